use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

use deepcap_core::AppCore;
use deepcap_core::leads::{LeadDraft, WebInfoClient};

use crate::cli::CaptureArgs;
use crate::output::{OutputFormat, print_json};

pub async fn run(core: Arc<AppCore>, args: CaptureArgs, format: OutputFormat) -> Result<()> {
    let (_, endpoints) = core.config.current();

    let client = WebInfoClient::new(endpoints)?;
    let info = client.capture(&args.url, &args.token).await?;

    let mut draft = LeadDraft::new(args.url);
    draft.auto_fill(&info);

    if format.is_json() {
        return print_json(&draft);
    }

    println!("{}", "Captured source metadata".bold());
    println!("Title:      {}", field(&draft.title));
    println!("Website:    {}", field(&draft.website));
    println!(
        "Published:  {}",
        draft
            .published_on
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "Publisher:  {}",
        draft
            .source
            .as_ref()
            .map(|org| org.title.as_str())
            .unwrap_or("-")
    );
    if draft.authors.is_empty() {
        println!("Authors:    -");
    } else {
        let authors: Vec<&str> = draft.authors.iter().map(|org| org.title.as_str()).collect();
        println!("Authors:    {}", authors.join(", "));
    }

    Ok(())
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}
