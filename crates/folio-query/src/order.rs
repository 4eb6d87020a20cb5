// SPDX-License-Identifier: Apache-2.0

use folio_model::Project;
use std::cmp::Ordering;

/// Canonical display order.
///
/// Explicit `default_order` ranks ascending and always beats chronology: a
/// record that defines it sorts before one that does not. With no explicit
/// order on either side, newer years come first. Ties fall back to id so the
/// ordering is total and stable across runs.
#[must_use]
pub fn display_order(a: &Project, b: &Project) -> Ordering {
    match (a.default_order, b.default_order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b
            .year
            .as_number()
            .cmp(&a.year.as_number())
            .then_with(|| a.id.cmp(&b.id)),
    }
}

pub fn order_projects(projects: &mut [Project]) {
    projects.sort_by(display_order);
}
