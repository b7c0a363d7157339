//! Component trait and implementations

/// Marker trait for components
pub trait Component: 'static + Send + Sync {
    /// Human-readable component name used in error reports
    const NAME: &'static str;
}

impl Component for crate::ecs::components::TransformComponent {
    const NAME: &'static str = "TransformComponent";
}

impl Component for crate::ecs::components::ColliderComponent {
    const NAME: &'static str = "ColliderComponent";
}
