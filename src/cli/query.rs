//! Query command implementation.
//!
//! Runs the same aggregation as `build` (respecting the download cache) and
//! prints the sorted podcast collection as JSON. No site files are written.

use std::fs;
use std::io::Write;

use anyhow::Result;
use serde_json::{Map, Value as JsonValue};

use super::common::{fetch_podcasts, select_entries};
use crate::cli::args::QueryArgs;
use crate::config::SiteConfig;
use crate::log;
use crate::podcast::Podcast;
use crate::utils::plural::plural_count;

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    fs::create_dir_all(&config.build.cache)?;

    let jobs = select_entries(&config.podcasts);
    let podcasts = fetch_podcasts(config, &jobs, None);
    if args.output.is_some() {
        log!("query"; "found {}", plural_count(podcasts.len(), "podcast"));
    }

    output_results(&podcasts, args)
}

fn output_results(podcasts: &[Podcast], args: &QueryArgs) -> Result<()> {
    let output = format_results(podcasts, args.fields.as_deref())?;

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    // Output to file or stdout
    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)?;
        writeln!(file, "{formatted}")?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        println!("{formatted}");
    }

    Ok(())
}

/// Serialize all podcasts, optionally keeping only the requested fields.
///
/// Requested fields that don't exist are emitted as `null`.
fn format_results(podcasts: &[Podcast], fields: Option<&[String]>) -> Result<JsonValue> {
    let value = serde_json::to_value(podcasts)?;
    let Some(fields) = fields else {
        return Ok(value);
    };

    let JsonValue::Array(items) = value else {
        return Ok(value);
    };
    let filtered = items
        .into_iter()
        .map(|item| {
            let mut obj = Map::new();
            if let JsonValue::Object(mut full) = item {
                for field in fields {
                    let value = full.remove(field).unwrap_or(JsonValue::Null);
                    obj.insert(field.clone(), value);
                }
            }
            JsonValue::Object(obj)
        })
        .collect();
    Ok(JsonValue::Array(filtered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::html::SafeHtml;

    fn podcast(slug: &str) -> Podcast {
        Podcast {
            slug: slug.into(),
            title: slug.to_uppercase(),
            description: SafeHtml::trusted("<p>d</p>"),
            feed_url: format!("https://{slug}.example/feed"),
            website_url: String::new(),
            secondary_website_url: None,
            image_url: None,
            episodes: Vec::new(),
            latest_publish: None,
            latest_publish_display: String::new(),
        }
    }

    #[test]
    fn test_format_all_fields() {
        let json = format_results(&[podcast("a")], None).unwrap();
        let first = &json[0];
        assert_eq!(first["slug"], "a");
        assert_eq!(first["description"], "<p>d</p>");
        assert!(first["latest_publish"].is_null());
        assert!(first["episodes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_format_selected_fields_in_order() {
        let fields = vec!["title".to_owned(), "slug".to_owned(), "nope".to_owned()];
        let json = format_results(&[podcast("a"), podcast("b")], Some(&fields)).unwrap();

        assert_eq!(
            serde_json::to_string(&json).unwrap(),
            r#"[{"title":"A","slug":"a","nope":null},{"title":"B","slug":"b","nope":null}]"#
        );
    }
}
