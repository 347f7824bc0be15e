//! Structured model of the SSH client configuration file.
//!
//! Pure functions only — no I/O, no async, no filesystem access. The
//! document is parsed into stanzas, modified in memory, and serialized
//! back; removal always drops a whole stanza, so a stanza that grew an
//! optional `Port` or `ProxyCommand` line can never be corrupted by a
//! positional edit.

use std::path::PathBuf;

// ── Types ────────────────────────────────────────────────────────────────────

/// Connection parameters for one registered host alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// Symbolic alias, unique within the document.
    pub alias: String,
    /// Real hostname to connect to.
    pub hostname: String,
    /// Login user.
    pub user: String,
    /// Absolute path to the private key.
    pub identity_path: PathBuf,
}

/// One `Host` block: the pattern text from the header line plus every
/// following line, kept verbatim so foreign options survive a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    /// Pattern text after `Host ` on the header line.
    pub alias: String,
    /// Body lines exactly as read (indentation included).
    pub lines: Vec<String>,
}

impl Stanza {
    /// Look up an option value in this stanza by keyword
    /// (case-insensitive, `Key value` or `Key=value`).
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&str> {
        self.lines
            .iter()
            .find_map(|line| parse_option(line).filter(|(k, _)| k.eq_ignore_ascii_case(key)))
            .map(|(_, v)| v)
    }
}

/// The whole config file: free text before the first `Host` header, then
/// an ordered sequence of stanzas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    preamble: Vec<String>,
    stanzas: Vec<Stanza>,
}

// ── Parsing / serialization ──────────────────────────────────────────────────

/// Split a config line into `(keyword, value)`, accepting both
/// whitespace and `=` separators.
fn parse_option(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let split_at = trimmed.find(|c: char| c.is_whitespace() || c == '=')?;
    let (key, rest) = trimmed.split_at(split_at);
    let value = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '=');
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Returns the host pattern if `line` is a `Host` header.
fn host_header(line: &str) -> Option<&str> {
    parse_option(line).filter(|(k, _)| k.eq_ignore_ascii_case("host")).map(|(_, v)| v)
}

impl ConfigDocument {
    /// Parse the text of an SSH config file.
    ///
    /// Unrecognized content is preserved: lines before the first `Host`
    /// header become the preamble, and every stanza keeps its body lines
    /// byte-for-byte.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::default();
        for line in text.lines() {
            if let Some(pattern) = host_header(line) {
                doc.stanzas.push(Stanza {
                    alias: pattern.to_string(),
                    lines: Vec::new(),
                });
            } else if let Some(current) = doc.stanzas.last_mut() {
                current.lines.push(line.to_string());
            } else {
                doc.preamble.push(line.to_string());
            }
        }
        doc
    }

    /// Serialize back to config-file text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        for stanza in &self.stanzas {
            out.push_str("Host ");
            out.push_str(&stanza.alias);
            out.push('\n');
            for line in &stanza.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Remove the stanza whose pattern is exactly `alias`, however many
    /// lines it has. Returns `true` if a stanza was removed.
    pub fn remove(&mut self, alias: &str) -> bool {
        let before = self.stanzas.len();
        self.stanzas.retain(|s| s.alias != alias);
        before != self.stanzas.len()
    }

    /// Replace-or-append the stanza for `entry.alias`.
    ///
    /// Surviving stanzas keep their order; the new stanza is always
    /// appended at the end in the fixed 4-line shape.
    pub fn upsert(&mut self, entry: &HostEntry) {
        self.remove(&entry.alias);
        self.stanzas.push(Stanza {
            alias: entry.alias.clone(),
            lines: vec![
                format!("    HostName {}", entry.hostname),
                format!("    User {}", entry.user),
                format!("    IdentityFile {}", entry.identity_path.display()),
            ],
        });
    }

    /// Returns `true` if a stanza with exactly this pattern exists.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.stanzas.iter().any(|s| s.alias == alias)
    }

    /// All stanzas, in file order.
    #[must_use]
    pub fn stanzas(&self) -> &[Stanza] {
        &self.stanzas
    }

    /// Every `IdentityFile` value declared anywhere in the document, in
    /// file order, duplicates included.
    #[must_use]
    pub fn identity_files(&self) -> Vec<String> {
        self.stanzas
            .iter()
            .flat_map(|s| s.lines.iter())
            .filter_map(|line| {
                parse_option(line)
                    .filter(|(k, _)| k.eq_ignore_ascii_case("identityfile"))
                    .map(|(_, v)| v.to_string())
            })
            .collect()
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
