//! Built-in calculators.

// Allocation calculators
pub mod oversubscription;
pub mod unpurchased;
