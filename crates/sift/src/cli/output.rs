//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use sift_highlight::{colors, dim, header, subheader, warning};
use sift_results::{DisplayHit, PageInfo, SearchPage};

/// Prints a search page as pretty JSON.
pub fn print_json(page: &SearchPage) -> ExitCode {
    match serde_json::to_string_pretty(page) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints a search page for the terminal.
pub fn print_page(page: &SearchPage, extra_properties: &[String]) {
    if let Some(error) = &page.error {
        eprintln!("{} {error}", warning("query error:"));
    }

    let info = &page.page;
    if page.hits.is_empty() {
        if info.total_entries > 0 {
            println!(
                "{}",
                dim(&format!(
                    "No results on this page ({} in total).",
                    info.total_entries
                ))
            );
        } else {
            println!("{}", dim(&format!("No results for \"{}\".", page.keywords)));
        }
        return;
    }

    println!(
        "{} {}",
        header(&format!(
            "Results {}-{} of {} for \"{}\"",
            info.start_num, info.stop_num, info.total_entries, page.keywords
        )),
        dim(&format!("({} ms)", page.elapsed_ms))
    );
    println!();

    for hit in &page.hits {
        print_hit(hit, extra_properties);
    }

    if let Some(pager) = pager(info) {
        println!("{pager}");
    }
}

/// Prints one hit.
fn print_hit(hit: &DisplayHit, extra_properties: &[String]) {
    println!("{}. {}", hit.record_count, subheader(&hit.title));

    let mut meta = vec![hit.path.clone()];
    meta.extend([&hit.size, &hit.date].into_iter().filter(|s| !s.is_empty()).cloned());
    meta.push(format!("rank {}", hit.rank));
    println!("   {}", dim(&meta.join(" · ")));

    let description = collapse_whitespace(&hit.description);
    if !description.is_empty() {
        // Truncation can cut a color sequence short.
        println!("   {description}{}", colors::RESET);
    }

    for name in extra_properties {
        if let Some(value) = hit.extra(name) {
            println!("   {} {value}", dim(&format!("{name}:")));
        }
    }
    println!();
}

/// Renders the pager line, or `None` when everything fits on one page.
fn pager(info: &PageInfo) -> Option<String> {
    if info.pages.is_empty() {
        return None;
    }

    let numbers: Vec<String> = info
        .pages
        .iter()
        .map(|link| {
            if link.current {
                subheader(&format!("[{}]", link.page_num))
            } else {
                link.page_num.to_string()
            }
        })
        .collect();

    let mut line = format!("Pages: {}", numbers.join(" "));
    if info.next_page > 0 {
        line.push_str(&dim(&format!("  (next: --page {})", info.next_page)));
    }
    Some(line)
}

/// Joins all whitespace runs into single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use sift_results::paginate;

    use super::*;

    #[test]
    fn single_page_has_no_pager() {
        assert_eq!(pager(&paginate(3, 10, 1)), None);
    }

    #[test]
    fn pager_marks_current_page() {
        let line = pager(&paginate(30, 10, 2)).unwrap();
        assert!(line.contains(&subheader("[2]")));
        assert!(line.contains("--page 3"));
    }

    #[test]
    fn last_page_has_no_next_hint() {
        let line = pager(&paginate(30, 10, 3)).unwrap();
        assert!(!line.contains("--page"));
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(collapse_whitespace(" a\n\n b\tc "), "a b c");
    }
}
