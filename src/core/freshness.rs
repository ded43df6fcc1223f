/// How far a term is from being a literal value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// No binding is reachable at all.
    Fresh,
    /// Bindings are reachable, but they still lead to unbound variables.
    Bound,
    /// Fully resolved to a literal value.
    Ground,
}

impl Freshness {
    pub fn is_fresh(self) -> bool {
        self == Freshness::Fresh
    }

    pub fn is_ground(self) -> bool {
        self == Freshness::Ground
    }

    /// Combine the freshness of the children of a composite term.
    pub(crate) fn combine(children: impl IntoIterator<Item = Freshness>) -> Freshness {
        let mut all_ground = true;
        let mut all_fresh = true;
        for child in children {
            all_ground &= child == Freshness::Ground;
            all_fresh &= child == Freshness::Fresh;
        }
        match (all_ground, all_fresh) {
            (true, _) => Freshness::Ground,
            (_, true) => Freshness::Fresh,
            _ => Freshness::Bound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Freshness::*;

    #[test]
    fn no_children_is_ground() {
        assert_eq!(Freshness::combine(vec![]), Ground);
    }

    #[test]
    fn mixed_children_are_bound() {
        assert_eq!(Freshness::combine(vec![Ground, Fresh]), Bound);
        assert_eq!(Freshness::combine(vec![Fresh, Bound]), Bound);
    }

    #[test]
    fn uniform_children_keep_their_freshness() {
        assert_eq!(Freshness::combine(vec![Fresh, Fresh]), Fresh);
        assert_eq!(Freshness::combine(vec![Ground, Ground]), Ground);
    }
}
