//! # Component System
//!
//! Components are pure data containers with no behavior.
//! Each component type owns one bit of the entity mask and one pool.

/// Marker trait for ECS components.
///
/// The id selects the mask bit and the pool slot, so it must be unique per
/// world and below the world's `max_component_types`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
/// #[repr(C)]
/// struct Transform {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Transform {
///     const ID: u8 = 0;
/// }
/// ```
pub trait Component: Sized + 'static {
    /// Unique identifier for this component type (0-63).
    const ID: u8;

    /// Human-readable name used in errors and entity descriptions.
    ///
    /// Defaults to the type name without its module path.
    #[must_use]
    fn name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Strips the module path from a type name, keeping generic arguments intact.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Health;

    impl Component for Health {
        const ID: u8 = 4;
    }

    struct Named;

    impl Component for Named {
        const ID: u8 = 5;

        fn name() -> &'static str {
            "tag"
        }
    }

    #[test]
    fn test_default_name_is_short() {
        assert_eq!(Health::name(), "Health");
        assert_eq!(Named::name(), "tag");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::Thing"), "Thing");
        assert_eq!(short_type_name("Thing"), "Thing");
        assert_eq!(short_type_name("a::Wrap<b::Inner>"), "Wrap<b::Inner>");
    }
}
