use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{MapPreventDuplicates, serde_as};

use changeset_core::{BumpType, Changeset, PackageRelease};

use crate::error::{FormatError, FrontMatterError, ValidationError};

const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

#[serde_as]
#[derive(Deserialize)]
struct ReleasesMap {
    #[serde(flatten)]
    #[serde_as(as = "MapPreventDuplicates<_, _>")]
    releases: IndexMap<String, BumpType>,
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

fn find_closing_delimiter(content: &str) -> Option<usize> {
    if content.starts_with(FRONT_MATTER_DELIMITER) {
        return Some(0);
    }
    if let Some(pos) = content.find("\r\n---") {
        return Some(pos + 2);
    }
    if let Some(pos) = content.find("\n---") {
        return Some(pos + 1);
    }
    None
}

/// Splits a changeset file into its YAML front matter and markdown body.
fn split_front_matter(content: &str) -> Result<(&str, &str), FormatError> {
    let trimmed = content.trim_start();

    let Some(after_opening) = trimmed.strip_prefix(FRONT_MATTER_DELIMITER) else {
        return Err(FrontMatterError::MissingOpeningDelimiter.into());
    };
    let after_opening = strip_line_ending(after_opening);

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return Err(FrontMatterError::MissingClosingDelimiter.into());
    };

    let yaml_content = after_opening[..closing_pos].trim_end_matches('\r');
    let after_closing = &after_opening[closing_pos + FRONT_MATTER_DELIMITER.len()..];

    Ok((yaml_content, strip_line_ending(after_closing)))
}

fn parse_releases(yaml_content: &str) -> Result<Vec<PackageRelease>, FormatError> {
    if yaml_content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let parsed: ReleasesMap = serde_yml::from_str(yaml_content)?;

    Ok(parsed
        .releases
        .into_iter()
        .map(|(name, bump_type)| PackageRelease { name, bump_type })
        .collect())
}

/// Parses the content of one changeset file.
///
/// The front matter maps package names to bump types and may be empty, which
/// yields a changeset without releases.
///
/// # Errors
///
/// Returns an error if the delimiters are missing, the YAML is invalid, a
/// package is listed twice, or the input is too large.
#[must_use = "parsing result should be handled"]
pub fn parse_changeset(id: &str, content: &str) -> Result<Changeset, FormatError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyId.into());
    }

    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let (yaml_content, body) = split_front_matter(content)?;
    let releases = parse_releases(yaml_content)?;

    Ok(Changeset {
        id: id.to_string(),
        summary: body.trim().to_string(),
        releases,
    })
}
