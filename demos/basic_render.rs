//! Basic rendering example demonstrating the Markdown renderer

use renovar_markdown::{Post, PostPage, render};

fn main() {
    println!("=== RENOVAR Markdown Renderer - Basic Examples ===\n");

    // Example 1: Headings and paragraphs
    example(
        "Headings and paragraphs",
        "# Bem-vindo\nA RENOVAR transforma espaços.\n## Serviços",
    );

    // Example 2: Lists and emphasis
    example("Lists and emphasis", "* **Pintura**\n* *Elétrica*\n* `Hidráulica`");

    // Example 3: Blockquotes and code
    example("Blockquotes and code", "> Excelente trabalho!\n```\n<medidas>\n```");

    // Example 4: Escaping
    example("Escaping", "<script>alert('x')</script>");

    // Example 5: A full post page
    example_post();
}

fn example(name: &str, markdown: &str) {
    println!("{name}");
    println!("Input Markdown:");
    println!("{markdown}\n");
    println!("Output HTML:");
    println!("{}", render(markdown));
    println!("---\n");
}

fn example_post() {
    println!("Full post page");
    let json = r##"{"id": 1, "slug": "cozinha", "title": "Cozinha nova", "label": "Obras",
        "createdAt": "2024-03-09T18:45:00Z", "content": "# Resultado\nFicou **ótimo**."}"##.as_bytes();

    match Post::from_json(json) {
        Ok(post) => {
            let page = PostPage::default();
            let rendered = page.render_post(&post);
            println!("Title: {}", rendered.title);
            println!("{}", rendered.html);
            println!("\nListing card:");
            println!("{}", page.render_summary(&post));
        }
        Err(e) => eprintln!("Failed to decode post: {e}"),
    }
    println!("---\n");
}
