//! Lookup command implementation

use colored::Colorize;
use futures::future::join_all;
use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat, TabArg};
use crate::error::{Error, Result};
use crate::pipeline::{LookupOutcome, TabContext};

/// One tab's result, as printed in JSON output
#[derive(Debug, Serialize)]
struct LookupRow {
    tab_id: u64,
    #[serde(flatten)]
    outcome: RowOutcome,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RowOutcome {
    Done(LookupOutcome),
    Failed { outcome: &'static str, error: String },
}

/// Assign ids to tabs that were given without one
fn number_tabs(tabs: Vec<TabArg>) -> Vec<(u64, String)> {
    tabs.into_iter()
        .enumerate()
        .map(|(i, t)| (t.tab_id.unwrap_or(i as u64 + 1), t.url))
        .collect()
}

/// Run all lookups concurrently and report each tab's outcome
pub async fn run(ctx: &CommandContext, tabs: Vec<TabArg>) -> Result<()> {
    ctx.locator.start();

    let runs = number_tabs(tabs).into_iter().map(|(tab_id, url)| async move {
        let result = match TabContext::parse(tab_id, &url) {
            Ok(tab) => ctx.locator.handle_tab(&tab).await,
            Err(err) => Err(Error::from(err)),
        };
        (tab_id, result)
    });
    let results = join_all(runs).await;

    match ctx.format {
        OutputFormat::Json => {
            let rows: Vec<LookupRow> = results
                .into_iter()
                .map(|(tab_id, result)| LookupRow {
                    tab_id,
                    outcome: match result {
                        Ok(outcome) => RowOutcome::Done(outcome),
                        Err(err) => RowOutcome::Failed {
                            outcome: "error",
                            error: err.to_string(),
                        },
                    },
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Pretty => {
            for (tab_id, result) in results {
                let line = match result {
                    Ok(LookupOutcome::Linked { link }) => link.cyan().to_string(),
                    Ok(LookupOutcome::NoMatch { hits }) => {
                        format!("no match ({} hits)", hits).dimmed().to_string()
                    }
                    Err(err) => format!("error: {}", err).red().to_string(),
                };
                println!("[{}] {}", tab_id, line);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_tabs_fills_missing_ids() {
        let tabs = vec![
            TabArg {
                tab_id: None,
                url: "https://a.com".to_string(),
            },
            TabArg {
                tab_id: Some(42),
                url: "https://b.com".to_string(),
            },
            TabArg {
                tab_id: None,
                url: "https://c.com".to_string(),
            },
        ];

        let numbered = number_tabs(tabs);
        let ids: Vec<u64> = numbered.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 42, 3]);
    }

    #[test]
    fn test_row_json_shape() {
        let linked = LookupRow {
            tab_id: 1,
            outcome: RowOutcome::Done(LookupOutcome::Linked {
                link: "https://svc/a/articles/42".to_string(),
            }),
        };
        assert_eq!(
            serde_json::to_value(&linked).unwrap(),
            json!({ "tab_id": 1, "outcome": "linked", "link": "https://svc/a/articles/42" })
        );

        let failed = LookupRow {
            tab_id: 2,
            outcome: RowOutcome::Failed {
                outcome: "error",
                error: "boom".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "tab_id": 2, "outcome": "error", "error": "boom" })
        );
    }
}
