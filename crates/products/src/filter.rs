//! Filter Engine: narrows the catalog by search text, categories and price range.
//!
//! All predicates are combined with logical AND. Each one is skipped when its
//! input is empty, so `FilterCriteria::default()` is the identity filter.
//! The engine is a pure function of `(catalog, criteria)`.

use std::collections::BTreeSet;

use storefront_core::ValueObject;

use crate::product::{Price, Product};

/// One end of the price range, as typed by the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PriceBound {
    /// No input; the bound does not restrict anything.
    #[default]
    Unset,
    /// A parsed amount (inclusive).
    Amount(f64),
    /// Input with no leading number. The bound is active and admits nothing.
    Unparsable(String),
}

impl PriceBound {
    /// Parse raw input the way a browser reads a numeric text field.
    ///
    /// Only `""` is `Unset`. Otherwise the longest leading number wins
    /// (`"10abc"` is 10), and input without one (`"abc"`, `"  "`) is
    /// `Unparsable`.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Unset;
        }
        match leading_number(raw) {
            Some(amount) => Self::Amount(amount),
            None => Self::Unparsable(raw.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    // NaN amounts fall through both comparisons as false.
    fn admits_at_least(&self, price: Price) -> bool {
        match self {
            Self::Unset => true,
            Self::Amount(min) => price.amount() >= *min,
            Self::Unparsable(_) => false,
        }
    }

    fn admits_at_most(&self, price: Price) -> bool {
        match self {
            Self::Unset => true,
            Self::Amount(max) => price.amount() <= *max,
            Self::Unparsable(_) => false,
        }
    }
}

/// Longest decimal prefix of `raw` after leading whitespace: optional sign,
/// digits with an optional fraction, optional exponent, or `Infinity`.
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

impl From<&str> for PriceBound {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<f64> for PriceBound {
    fn from(amount: f64) -> Self {
        Self::Amount(amount)
    }
}

/// User-supplied constraints for one filter computation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub search_term: String,
    pub selected_categories: BTreeSet<String>,
    pub min_price: PriceBound,
    pub max_price: PriceBound,
}

impl ValueObject for FilterCriteria {}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria straight from form inputs (raw price text included).
    pub fn from_inputs<I, S>(search_term: &str, categories: I, min_price: &str, max_price: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_term: search_term.to_string(),
            selected_categories: categories.into_iter().map(Into::into).collect(),
            min_price: PriceBound::parse(min_price),
            max_price: PriceBound::parse(max_price),
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.selected_categories.insert(category.into());
        self
    }

    pub fn with_min_price(mut self, bound: impl Into<PriceBound>) -> Self {
        self.min_price = bound.into();
        self
    }

    pub fn with_max_price(mut self, bound: impl Into<PriceBound>) -> Self {
        self.max_price = bound.into();
        self
    }

    pub fn search_is_active(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        !self.search_is_active()
            && self.selected_categories.is_empty()
            && !self.min_price.is_active()
            && !self.max_price.is_active()
    }

    /// Whether a single product passes every active predicate.
    pub fn matches(&self, product: &Product) -> bool {
        self.compile().admits(product)
    }

    fn compile(&self) -> Predicates<'_> {
        Predicates {
            needle: self
                .search_is_active()
                .then(|| self.search_term.to_lowercase()),
            criteria: self,
        }
    }
}

/// Criteria with the search needle lowercased once per invocation.
struct Predicates<'c> {
    needle: Option<String>,
    criteria: &'c FilterCriteria,
}

impl Predicates<'_> {
    fn admits(&self, product: &Product) -> bool {
        self.admits_text(product)
            && self.admits_category(product)
            && self.criteria.min_price.admits_at_least(product.price())
            && self.criteria.max_price.admits_at_most(product.price())
    }

    fn admits_text(&self, product: &Product) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => product.name().to_lowercase().contains(needle.as_str()),
        }
    }

    fn admits_category(&self, product: &Product) -> bool {
        let selected = &self.criteria.selected_categories;
        selected.is_empty() || selected.contains(product.category())
    }
}

/// Indices into `catalog` of the products passing `criteria`, ascending.
pub fn matching_positions(catalog: &[Product], criteria: &FilterCriteria) -> Vec<usize> {
    let predicates = criteria.compile();
    catalog
        .iter()
        .enumerate()
        .filter(|(_, product)| predicates.admits(product))
        .map(|(idx, _)| idx)
        .collect()
}

/// The subset of `catalog` passing `criteria`, in catalog order.
pub fn apply<'a>(catalog: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let predicates = criteria.compile();
    catalog.iter().filter(|product| predicates.admits(product)).collect()
}
