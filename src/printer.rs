use crate::http::{Headers, HttpResponse};
use anstyle::{AnsiColor, Style};
use std::io::{self, Write};

fn pretty_print_json_colored(value: &serde_json::Value) -> String {
    use colored_json::{Color, ColoredFormatter, PrettyFormatter, Styler};
    let styler = Styler {
        key: Color::Yellow.bold(),
        ..Default::default()
    };
    let formatter = ColoredFormatter::with_styler(PrettyFormatter::new(), styler);
    formatter
        .to_colored_json_auto(value)
        .unwrap_or_else(|_| serde_json::to_string_pretty(value).unwrap_or_default())
}

fn get_status_style(status: u16) -> Style {
    let color = match status {
        200..=299 => AnsiColor::Green,
        300..=399 => AnsiColor::Yellow,
        400..=599 => AnsiColor::Red,
        _ => AnsiColor::White,
    };
    Style::new()
        .fg_color(Some(anstyle::Color::Ansi(color)))
        .bold()
}

fn format_status_line(status: u16) -> String {
    let status_style = get_status_style(status);
    format!(
        "{}Status: {}{}\n",
        status_style.render(),
        status,
        anstyle::Reset.render()
    )
}

fn format_error_line(resp: &HttpResponse) -> String {
    match resp.error {
        Some(err) => {
            let style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)));
            format!(
                "{}Error: {} ({}){}\n",
                style.render(),
                err,
                err.code(),
                anstyle::Reset.render()
            )
        }
        None => String::new(),
    }
}

fn format_header(name: &str, value: &str) -> String {
    let key_style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Blue)));
    let value_style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::White)));
    format!(
        "{}{}: {}{}{}\n",
        key_style.render(),
        name,
        value_style.render(),
        value,
        anstyle::Reset.render()
    )
}

fn format_all_headers(headers: &Headers) -> String {
    let mut names: Vec<&String> = headers.keys().collect();
    names.sort();
    names
        .into_iter()
        .map(|name| format_header(name, &headers[name]))
        .collect()
}

fn format_body(body: &str, parsed_json: Option<&serde_json::Value>) -> String {
    match parsed_json {
        Some(json) => format!("{}\n", pretty_print_json_colored(json)),
        None => {
            let value_style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::White)));
            format!(
                "{}{}{}\n",
                value_style.render(),
                body,
                anstyle::Reset.render()
            )
        }
    }
}

/// Render an envelope for the terminal
///
/// Headers are shown when `verbose` is set or an error was classified. An empty
/// body prints nothing.
pub fn format_response(resp: &HttpResponse, verbose: bool) -> String {
    let mut output = String::new();

    if let Some(status) = resp.status {
        output.push_str(&format_status_line(status));
    }
    output.push_str(&format_error_line(resp));

    if let Some(headers) = &resp.headers {
        if verbose || resp.error.is_some() {
            output.push_str(&format_all_headers(headers));
        }
    }

    if let Some(body) = resp.text().filter(|b| !b.is_empty()) {
        let parsed_json = serde_json::from_str::<serde_json::Value>(&body).ok();
        output.push_str(&format_body(&body, parsed_json.as_ref()));
    }

    output
}

pub fn print_response(resp: &HttpResponse, verbose: bool) {
    let _ = print_response_to(&mut io::stdout(), resp, verbose);
}

fn print_response_to<W: Write>(
    writer: &mut W,
    resp: &HttpResponse,
    verbose: bool,
) -> io::Result<()> {
    write!(writer, "{}", format_response(resp, verbose))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpError;
    use bytes::Bytes;

    fn response(status: u16, body: &'static str) -> HttpResponse {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        HttpResponse {
            error: HttpError::from_status(status),
            status: Some(status),
            headers: Some(headers),
            body: Some(Bytes::from_static(body.as_bytes())),
        }
    }

    fn color(c: AnsiColor) -> String {
        Style::new()
            .fg_color(Some(anstyle::Color::Ansi(c)))
            .render()
            .to_string()
    }

    #[test]
    fn test_format_status_color_2xx() {
        let output = format_response(&response(200, "{}"), false);
        assert!(output.contains("Status: 200"));
        assert!(output.contains(&color(AnsiColor::Green)));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_format_error_status_shows_headers() {
        let output = format_response(&response(404, "{}"), false);
        assert!(output.contains("Status: 404"));
        assert!(output.contains(&color(AnsiColor::Red)));
        assert!(output.contains("Error: not found (404)"));
        assert!(output.contains("content-type: "));
    }

    #[test]
    fn test_format_headers_only_when_verbose() {
        let quiet = format_response(&response(200, "{}"), false);
        assert!(!quiet.contains("content-type: "));
        let verbose = format_response(&response(200, "{}"), true);
        assert!(verbose.contains("content-type: "));
        assert!(verbose.contains("application/json"));
    }

    #[test]
    fn test_format_pretty_print_json() {
        let output = format_response(&response(200, r#"{"foo":1,"bar":{"baz":2}}"#), false);
        assert!(output.contains("foo"));
        assert!(output.contains("baz"));
        assert!(output.contains('{'));
    }

    #[test]
    fn test_format_connection_failure() {
        let output = format_response(&HttpResponse::failure(HttpError::ConnectionFailure), false);
        assert!(!output.contains("Status:"));
        assert!(output.contains("Error: connection failure (1)"));
    }

    #[test]
    fn test_print_response_to_writer_trailing_newline() {
        let mut buf = Vec::new();
        print_response_to(&mut buf, &response(200, "hello"), false).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("hello"));
        assert!(output.ends_with('\n'));
    }
}
