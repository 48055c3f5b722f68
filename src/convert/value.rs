/// The outcome of resolving a property: its value and whether the resource
/// held it in a fully usable form.
///
/// `is_valid == false` means the stored data was missing or partly unusable and
/// the resource should be rewritten with `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue<T> {
    value: T,
    is_valid: bool,
}

impl<T> PropertyValue<T> {
    pub fn new(value: T, is_valid: bool) -> Self {
        Self { value, is_valid }
    }

    pub fn valid(value: T) -> Self {
        Self::new(value, true)
    }

    /// A value (usually the default) that must be written back to the resource.
    pub fn requiring_rewrite(value: T) -> Self {
        Self::new(value, false)
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PropertyValue<U> {
        PropertyValue::new(f(self.value), self.is_valid)
    }
}
