/// Named predicate-to-effect mapping evaluated against a derived feature set.
///
/// Rules hold only immutable configuration, so a single instance can be shared across
/// concurrent evaluations.
pub trait Rule<F>: Send + Sync {
    type Effect;

    fn name(&self) -> &'static str;

    fn evaluate(&self, features: &F) -> Option<Self::Effect>;
}

/// Fixed, ordered registration list of rules for one engine instantiation.
///
/// Every rule is evaluated unconditionally; registration order only decides the order
/// in which effects are returned.
pub struct RuleSet<F, E> {
    rules: Vec<Box<dyn Rule<F, Effect = E>>>,
}

impl<F, E> RuleSet<F, E> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule<R>(mut self, rule: R) -> Self
    where
        R: Rule<F, Effect = E> + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn evaluate(&self, features: &F) -> Vec<E> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(features))
            .collect()
    }
}

impl<F, E> Default for RuleSet<F, E> {
    fn default() -> Self {
        Self::new()
    }
}
