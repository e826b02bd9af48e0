//! Terminal output helpers

const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Render a URL for stdout, clickable (OSC 8) when the terminal supports it.
pub fn terminal_link(url: &str) -> String {
    render_link(
        url,
        supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout),
    )
}

fn render_link(url: &str, hyperlinks: bool) -> String {
    if hyperlinks {
        format!("\x1b]8;;{url}\x07{CYAN}{url}{RESET}\x1b]8;;\x07")
    } else {
        format!("{CYAN}{url}{RESET}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_link() {
        assert_eq!(
            render_link("http://localhost:8000", false),
            "\x1b[36mhttp://localhost:8000\x1b[0m"
        );
    }

    #[test]
    fn test_osc8_link() {
        let link = render_link("http://localhost:8000/api/docs", true);
        assert!(link.starts_with("\x1b]8;;http://localhost:8000/api/docs\x07"));
        assert!(link.ends_with("\x1b]8;;\x07"));
    }

    #[test]
    fn test_terminal_link_contains_url() {
        let url = "http://localhost:8000/api/query?q=symbol%3DNVDA";
        assert!(terminal_link(url).contains(url));
    }
}
