//! High-level runtime engine settings
//!
//! Selects the force source (tree or direct summation) and whether the
//! per-particle update phase runs on the rayon pool

#[derive(Debug, Clone)]
pub struct Engine {
    pub barnes_hut: bool, // false = direct N^2 reference, true = quadtree
    pub parallel: bool, // evaluate particle updates in parallel
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            barnes_hut: true,
            parallel: false,
        }
    }
}
