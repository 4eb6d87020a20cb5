use folio_model::Project;
use rand::Rng;

/// Fisher–Yates over the already-ordered list. Uniform permutation; purely
/// cosmetic and never part of the data contract.
pub fn shuffle_projects<R: Rng + ?Sized>(rng: &mut R, projects: &mut [Project]) {
    for i in (1..projects.len()).rev() {
        let j = rng.gen_range(0..=i);
        projects.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{Project, ProjectId, ProjectSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn catalog(n: usize) -> Vec<Project> {
        (0..n)
            .map(|i| {
                let source = ProjectSource {
                    title: Some(format!("Project {i}")),
                    description: Some("D".to_string()),
                    year: Some("2024".to_string()),
                    image: Some("/i.jpg".to_string()),
                    ..ProjectSource::default()
                };
                Project::from_source(
                    ProjectId::parse(&format!("p{i:02}")).expect("id"),
                    source,
                )
                .expect("project")
            })
            .collect()
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let original = catalog(12);
        let mut shuffled = original.clone();
        let mut rng = StdRng::seed_from_u64(7);
        shuffle_projects(&mut rng, &mut shuffled);

        let mut a: Vec<&str> = original.iter().map(|p| p.id.as_str()).collect();
        let mut b: Vec<&str> = shuffled.iter().map(|p| p.id.as_str()).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_shuffles_produce_a_different_order() {
        let original = catalog(12);
        let moved = (0..32).any(|seed| {
            let mut shuffled = original.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            shuffle_projects(&mut rng, &mut shuffled);
            shuffled != original
        });
        assert!(moved, "32 shuffles of 12 items never changed the order");
    }

    #[test]
    fn short_lists_are_untouched() {
        let mut empty: Vec<Project> = Vec::new();
        let mut rng = StdRng::seed_from_u64(0);
        shuffle_projects(&mut rng, &mut empty);
        assert!(empty.is_empty());

        let mut one = catalog(1);
        shuffle_projects(&mut rng, &mut one);
        assert_eq!(one[0].id.as_str(), "p00");
    }
}
