/// A configurable value, together with its name and bounds.
///
/// Bounds are advisory, and used by [within_bounds](ConfigOption::within_bounds).
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }
}

impl<T: PartialOrd> ConfigOption<T> {
    /// Whether the value of the option lies within its bounds.
    pub fn within_bounds(&self) -> bool {
        self.min <= self.value && self.value <= self.max
    }
}
