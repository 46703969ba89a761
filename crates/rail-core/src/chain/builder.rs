//! Builder fluido para `Chain`.
//!
//! ```ignore
//! let chain = Chain::builder()
//!     .step(Step::map(|v: i32| v + 1))
//!     .maybe(debug.then(|| Step::inspect(|v: &i32| println!("{v}"))))
//!     .build();
//! ```

use super::Chain;
use crate::step::Step;

#[derive(Debug)]
pub struct ChainBuilder<T> {
    steps: Vec<Option<Step<T>>>,
}

impl<T> Default for ChainBuilder<T> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<T: 'static> ChainBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade un step al final de la declaración.
    pub fn step(mut self, step: Step<T>) -> Self {
        self.steps.push(Some(step));
        self
    }

    /// Añade un step opcional; `None` queda como entrada transparente.
    pub fn maybe(mut self, step: Option<Step<T>>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps<I>(mut self, steps: I) -> Self
        where I: IntoIterator<Item = Step<T>>
    {
        self.steps.extend(steps.into_iter().map(Some));
        self
    }

    /// Cantidad de entradas declaradas (incluye las `None`).
    pub fn declared(&self) -> usize {
        self.steps.len()
    }

    pub fn build(self) -> Chain<T> {
        Chain::new(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;

    #[test]
    fn builder_preserves_declaration_order() {
        let chain = Chain::builder().step(Step::map(|s: String| s + "a"))
                                    .maybe(None)
                                    .steps(vec![Step::map(|s: String| s + "b"), Step::map(|s: String| s + "c")])
                                    .build();
        let out = chain.run(Outcome::new(String::new()));
        assert_eq!(out.value().map(String::as_str), Some("abc"));
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn empty_builder_counts_nothing() {
        let builder: ChainBuilder<u8> = ChainBuilder::new();
        assert_eq!(builder.declared(), 0);
        let out = builder.build().run(Outcome::new(1));
        assert_eq!(out.failures().len(), 1);
    }
}
