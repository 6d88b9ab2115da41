use anyhow::{Context, bail};
use rating_widget::configuration::get_configuration;
use rating_widget::document::Document;
use rating_widget::telemetry::{get_subscriber, init_subscriber};
use rating_widget::{Widget, WidgetState};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the markup.
    let subscriber = get_subscriber("info".into(), std::io::stderr);
    init_subscriber(subscriber)?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        bail!("Usage: {} user_name", args[0]);
    }

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let client = configuration
        .source
        .client()
        .context("Failed to build the HTTP client.")?;

    let mut document = Document::new();
    let root = document.create_root(configuration.viewport.width, configuration.viewport.height);
    let mut widget = Widget::new(&mut document, Some(root), &args[1]);
    widget.load(&mut document, &client).await;

    let drawn = widget.state() == WidgetState::Available;
    println!("{}", document.render(root));
    widget.dispose(&mut document);

    if !drawn {
        bail!("No chart could be drawn for {}", args[1]);
    }
    Ok(())
}
