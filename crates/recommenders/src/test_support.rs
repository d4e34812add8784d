//! Catalog fixtures shared by the unit tests.

use catalog::{Catalog, MovieRow};
use features::{FeatureConfig, FeatureModel};
use std::sync::Arc;

/// Five movies: two Michael Mann heist films, a mafia drama and two
/// animated films.
pub fn create_test_catalog() -> Catalog {
    Catalog::load(vec![
        MovieRow::new(1, "Heat", 1995, 8.3)
            .with_genre("Crime, Drama")
            .with_keywords("heist detective los angeles")
            .with_director("Michael Mann")
            .with_cast("Al Pacino Robert De Niro"),
        MovieRow::new(2, "Thief", 1981, 7.4)
            .with_genre("Crime")
            .with_keywords("heist safecracker chicago")
            .with_director("Michael Mann")
            .with_cast("James Caan"),
        MovieRow::new(3, "The Godfather", 1972, 9.2)
            .with_genre("Crime, Drama")
            .with_keywords("mafia family")
            .with_director("Francis Ford Coppola")
            .with_cast("Marlon Brando James Caan"),
        MovieRow::new(4, "Up", 2009, 8.2)
            .with_genre("Animation, Adventure")
            .with_keywords("balloon house")
            .with_director("Pete Docter")
            .with_cast("Ed Asner"),
        MovieRow::new(5, "Toy Story", 1995, 8.3)
            .with_genre("Animation, Comedy")
            .with_keywords("toys friendship")
            .with_director("John Lasseter")
            .with_cast("Tom Hanks"),
    ])
    .unwrap()
}

/// The three-movie regression catalog: two pure "action" movies and one
/// pure "drama".
pub fn create_fixture_catalog() -> Catalog {
    Catalog::load(vec![
        MovieRow::new(1, "A", 2015, 9.0).with_genre("Action"),
        MovieRow::new(2, "B", 2005, 5.0).with_genre("Action"),
        MovieRow::new(3, "C", 2019, 8.0).with_genre("Drama"),
    ])
    .unwrap()
}

pub fn recommender_parts(catalog: Catalog) -> (Arc<Catalog>, Arc<FeatureModel>) {
    let model = FeatureModel::build(&catalog, &FeatureConfig::default());
    (Arc::new(catalog), Arc::new(model))
}
