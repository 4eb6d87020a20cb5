use crate::order::order_projects;
use crate::tags::TagQuery;
use folio_model::Project;

/// How a request narrows the catalog. A collection resolves to its tag list
/// before reaching this layer; the distinction that remains is whether
/// non-matching projects are dropped (collection) or demoted (raw tags).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Selection {
    All,
    Tags(TagQuery),
    Collection(TagQuery),
}

#[must_use]
pub fn select_projects(projects: Vec<Project>, selection: &Selection) -> Vec<Project> {
    match selection {
        Selection::All => {
            let mut all = projects;
            order_projects(&mut all);
            all
        }
        Selection::Collection(query) => {
            let mut matching: Vec<Project> =
                projects.into_iter().filter(|p| query.matches(p)).collect();
            order_projects(&mut matching);
            matching
        }
        Selection::Tags(query) => {
            let (mut matching, mut rest): (Vec<Project>, Vec<Project>) =
                projects.into_iter().partition(|p| query.matches(p));
            order_projects(&mut matching);
            order_projects(&mut rest);
            matching.extend(rest);
            matching
        }
    }
}
