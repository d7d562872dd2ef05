use serde::{Deserialize, Serialize};

/// A parsed `FROM` directive from a Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromDirective {
    pub line_number: usize,
    /// Platform qualifier, captured verbatim including the `--platform=`
    /// prefix (e.g. `--platform=linux/amd64`).
    pub platform: Option<String>,
    /// The base image reference (e.g. `ubuntu:16.04`). Never empty.
    pub image: String,
    /// Raw trailing remainder after the image, typically `AS <name>`.
    pub alias: Option<String>,
}

/// Result of examining one raw Dockerfile line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// The line declares a base image.
    Directive(FromDirective),
    /// The line is not a `FROM` directive (comment, blank, other instruction).
    NotADirective,
    /// The line starts with `FROM` but lacks a parsable image token.
    /// Recoverable: the caller reports it and continues with the next line.
    Malformed { reason: String },
}

/// Parse a single raw line from a Dockerfile.
///
/// Whitespace runs are collapsed before tokenizing, so indentation and tab
/// separators are irrelevant. The `FROM` keyword itself is matched
/// case-sensitively as the first token; `from` and glued tokens like
/// `FROMfoo` are not directives.
///
/// Three line shapes are recognized, each as its own rule:
/// - `FROM --platform=<p> <image> [AS <alias>]`
/// - `FROM <image> AS <alias>`
/// - `FROM <image>`
pub fn parse_line(line: &str, line_number: usize) -> ParsedLine {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let Some((&keyword, rest)) = tokens.split_first() else {
        return ParsedLine::NotADirective;
    };
    if keyword != "FROM" {
        return ParsedLine::NotADirective;
    }

    let Some((&first, after_first)) = rest.split_first() else {
        return ParsedLine::Malformed {
            reason: "no image follows FROM".to_string(),
        };
    };

    // Platform rule. The marker is matched case-insensitively but the token
    // is captured verbatim.
    if first.to_ascii_lowercase().starts_with("--platform=") {
        let Some((&image, alias_tokens)) = after_first.split_first() else {
            return ParsedLine::Malformed {
                reason: "no image follows the platform qualifier".to_string(),
            };
        };
        return ParsedLine::Directive(FromDirective {
            line_number,
            platform: Some(first.to_string()),
            image: image.to_string(),
            alias: join_alias(alias_tokens),
        });
    }

    // Bare and alias rules collapse to the same shape: second token is the
    // image, everything after is the raw alias remainder.
    ParsedLine::Directive(FromDirective {
        line_number,
        platform: None,
        image: first.to_string(),
        alias: join_alias(after_first),
    })
}

fn join_alias(tokens: &[&str]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

impl FromDirective {
    /// Reconstruct the normalized `FROM` clause, without the image, split
    /// into the part before the image and the part after. Used by renderers
    /// that style the image token differently from its surroundings.
    pub fn clause_around_image(&self) -> (String, String) {
        let before = match &self.platform {
            Some(p) => format!("FROM {} ", p),
            None => "FROM ".to_string(),
        };
        let after = match &self.alias {
            Some(a) => format!(" {}", a),
            None => String::new(),
        };
        (before, after)
    }
}
