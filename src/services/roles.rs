// src/services/roles.rs

//! Header-driven column role inference.
//!
//! Roles are resolved from an ordered rule table. A role prefers the first
//! matching column that no earlier role took, but falls back to a taken one,
//! so a single column can still serve several roles when nothing else
//! matches. Ambiguous headers can mis-map silently; that is accepted.

use crate::models::{ColumnRole, ColumnRoleMap};

/// What a role resolves to when no header matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback {
    /// Use a fixed column
    Column(usize),
    /// Column 1 when the date role sits at column 0, otherwise column 0
    BesideDate,
    /// No column
    Absent,
}

struct RoleRule {
    role: ColumnRole,
    keywords: &'static [&'static str],
    fallback: Fallback,
}

/// Resolution order matters: title's fallback reads the resolved date column.
const ROLE_RULES: [RoleRule; 4] = [
    RoleRule {
        role: ColumnRole::Date,
        keywords: &["date", "time", "day"],
        fallback: Fallback::Column(0),
    },
    RoleRule {
        role: ColumnRole::Title,
        keywords: &["event", "title", "subject", "name", "summary"],
        fallback: Fallback::BesideDate,
    },
    RoleRule {
        role: ColumnRole::Description,
        keywords: &["desc", "detail", "note"],
        fallback: Fallback::Absent,
    },
    RoleRule {
        role: ColumnRole::Location,
        keywords: &["loc", "place", "venue"],
        fallback: Fallback::Absent,
    },
];

/// Assign a column to each role from the header row.
pub fn infer_roles<S: AsRef<str>>(headers: &[S]) -> ColumnRoleMap {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect();

    let mut roles = ColumnRoleMap {
        date: 0,
        title: 0,
        description: None,
        location: None,
    };

    let mut claimed: Vec<usize> = Vec::with_capacity(ROLE_RULES.len());

    for rule in &ROLE_RULES {
        let matched = find_first(&normalized, rule.keywords, &claimed);
        let resolved = matched.or(match rule.fallback {
            Fallback::Column(idx) => Some(idx),
            Fallback::BesideDate => Some(if roles.date == 0 { 1 } else { 0 }),
            Fallback::Absent => None,
        });

        match rule.role {
            ColumnRole::Date => roles.date = resolved.unwrap_or(0),
            ColumnRole::Title => roles.title = resolved.unwrap_or(0),
            ColumnRole::Description => roles.description = resolved,
            ColumnRole::Location => roles.location = resolved,
        }

        claimed.extend(resolved);

        if matched.is_none() {
            log::debug!(
                "No header matched the {} role, using {:?}",
                rule.role.as_str(),
                resolved
            );
        }
    }

    roles
}

/// Index of the first header containing any of `keywords`, preferring
/// columns not yet in `claimed`.
fn find_first(headers: &[String], keywords: &[&str], claimed: &[usize]) -> Option<usize> {
    let is_match = |h: &String| keywords.iter().any(|k| h.contains(k));
    let mut candidates = headers
        .iter()
        .enumerate()
        .filter(|&(_, h)| is_match(h))
        .map(|(idx, _)| idx);
    let first = candidates.next()?;
    if !claimed.contains(&first) {
        return Some(first);
    }
    Some(
        candidates
            .find(|idx| !claimed.contains(idx))
            .unwrap_or(first),
    )
}
