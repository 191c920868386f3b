//! Extract mirror links from the first table of a markdown document.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

struct Patterns {
    /// `[text](href "title")`; group 1 is `!` for images.
    inline: Regex,
    /// `<scheme://...>`
    autolink: Regex,
    /// `<a ... href="...">`
    anchor: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        inline: Regex::new(r#"(!?)\[[^\]]*\]\(\s*<?([^()\s<>]+)>?(?:\s+"[^"]*")?\s*\)"#)
            .expect("inline link pattern"),
        autolink: Regex::new(r"<([A-Za-z][A-Za-z0-9+.\-]*://[^<>\s]+)>")
            .expect("autolink pattern"),
        anchor: Regex::new(r#"(?i)<a\s[^>]*?href\s*=\s*["']([^"']*)["']"#)
            .expect("anchor pattern"),
    })
}

/// Link targets from the first table in `text`, deduplicated and sorted.
///
/// The first table is either a pipe table (header row followed by a
/// delimiter row such as `|---|:---:|`) or an HTML `<table>` block, whichever
/// comes first outside fenced code. Image targets are ignored. Returns an
/// empty list when the document has no table.
pub fn links_from_markdown(text: &str) -> Vec<String> {
    let Some(table) = first_table(text) else {
        return Vec::new();
    };

    let p = patterns();
    let mut links = BTreeSet::new();
    for caps in p.inline.captures_iter(&table) {
        if &caps[1] == "!" {
            continue;
        }
        links.insert(caps[2].to_string());
    }
    for caps in p.autolink.captures_iter(&table) {
        links.insert(caps[1].to_string());
    }
    for caps in p.anchor.captures_iter(&table) {
        links.insert(caps[1].to_string());
    }

    links
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn first_table(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut in_fence = false;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if line.to_ascii_lowercase().contains("<table") {
            let mut block = String::new();
            for l in &lines[i..] {
                block.push_str(l);
                block.push('\n');
                if l.to_ascii_lowercase().contains("</table>") {
                    break;
                }
            }
            return Some(block);
        }

        if line.contains('|') && lines.get(i + 1).is_some_and(|next| is_delimiter_row(next)) {
            let mut block = format!("{}\n", line);
            for l in &lines[i + 2..] {
                if l.trim().is_empty() || !l.contains('|') {
                    break;
                }
                block.push_str(l);
                block.push('\n');
            }
            return Some(block);
        }
    }

    None
}

/// `|---|:--:|---:|` style row (outer pipes optional).
fn is_delimiter_row(line: &str) -> bool {
    let row = line.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    if row.trim().is_empty() {
        return false;
    }
    row.split('|').all(|cell| {
        let cell = cell.trim();
        let dashes = cell.trim_start_matches(':').trim_end_matches(':');
        !dashes.is_empty() && dashes.chars().all(|c| c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"# Mirrors

See [the homepage](https://example.org/) for details.

| Site | HTTP | HTTPS | Other |
| ---- | :--: | ----- | ----- |
| ![cn](flags/cn.png) Alpha | [link](http://alpha.example/debian/) | [link](https://alpha.example/debian/) | [rsync](rsync://alpha.example/debian) |
| Beta | <http://beta.example/debian> | [link](https://beta.example/debian "Beta") | |
| Alpha again | [link](http://alpha.example/debian/) | | |

Second table is ignored:

| Site | URL |
|------|-----|
| Gamma | [link](https://gamma.example/) |
"#;

    #[test]
    fn extracts_first_table_links_sorted_and_deduplicated() {
        let links = links_from_markdown(DOC);
        assert_eq!(
            links,
            vec![
                "http://alpha.example/debian/",
                "http://beta.example/debian",
                "https://alpha.example/debian/",
                "https://beta.example/debian",
                "rsync://alpha.example/debian",
            ]
        );
    }

    #[test]
    fn html_table_counts_as_first_table() {
        let doc = r#"
<table>
  <tr><td><a href="https://one.example/">One</a></td></tr>
  <tr><td><A HREF='ftp://two.example/'>Two</A></td></tr>
</table>

| x | y |
|---|---|
| [z](https://later.example/) | |
"#;
        assert_eq!(
            links_from_markdown(doc),
            vec!["ftp://two.example/", "https://one.example/"]
        );
    }

    #[test]
    fn tables_inside_code_fences_are_skipped() {
        let doc = "```\n| a | b |\n|---|---|\n| [x](https://fenced.example/) | |\n```\n\n| a |\n|---|\n| [y](https://real.example/) |\n";
        assert_eq!(links_from_markdown(doc), vec!["https://real.example/"]);
    }

    #[test]
    fn no_table_no_links() {
        assert!(links_from_markdown("just [a link](https://x.example/)").is_empty());
    }

    #[test]
    fn delimiter_rows() {
        assert!(is_delimiter_row("| --- | :---: | ---: |"));
        assert!(is_delimiter_row("---|---"));
        assert!(!is_delimiter_row("| a | --- |"));
        assert!(!is_delimiter_row("||"));
    }
}
