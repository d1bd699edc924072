//! Core generator infrastructure and registry system.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

use crate::config::GeneratorConfig;
use crate::error::PropertyError;

/// Core generator trait for creating random test data
pub trait Generator<T> {
    /// Generate a random value of type T using the provided RNG and configuration
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> T;

    /// Lazy, unbounded sequence of generated values
    fn values<'a>(
        &'a self,
        rng: &'a mut dyn rand::RngCore,
        config: &'a GeneratorConfig,
    ) -> Values<'a, T, Self>
    where
        Self: Sized,
    {
        Values {
            generator: self,
            rng,
            config,
            _phantom: PhantomData,
        }
    }
}

impl<T, G: Generator<T> + ?Sized> Generator<T> for &G {
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> T {
        (**self).generate(rng, config)
    }
}

/// Iterator returned by [`Generator::values`]; never ends
pub struct Values<'a, T, G: ?Sized> {
    generator: &'a G,
    rng: &'a mut dyn rand::RngCore,
    config: &'a GeneratorConfig,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, G: Generator<T> + ?Sized> Iterator for Values<'_, T, G> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.generator.generate(&mut *self.rng, self.config))
    }
}

/// Type-safe registry for storing and retrieving generators
///
/// Build it once, register everything, then hand out shared references.
pub struct GeneratorRegistry {
    generators: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl GeneratorRegistry {
    /// Create a new empty generator registry
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Registry with the crate's default generators already registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<crate::input::StructuredInput, _>(
            crate::input::StructuredInputGenerator::new(),
        );
        registry
    }

    /// Register a generator for a specific type
    ///
    /// Returns `true` when an earlier registration for the same type was replaced.
    pub fn register<T: 'static, G: Generator<T> + Send + Sync + 'static>(
        &mut self,
        generator: G,
    ) -> bool {
        let type_id = TypeId::of::<T>();
        let replaced = self
            .generators
            .insert(type_id, Box::new(BoxedGenerator::new(generator)))
            .is_some();
        if replaced {
            tracing::warn!(
                type_name = std::any::type_name::<T>(),
                "generator re-registered; previous registration replaced"
            );
        }
        replaced
    }

    /// Get a generator for a specific type
    pub fn get<T: 'static>(&self) -> Option<&BoxedGenerator<T>> {
        let type_id = TypeId::of::<T>();
        self.generators
            .get(&type_id)
            .and_then(|boxed| boxed.downcast_ref::<BoxedGenerator<T>>())
    }

    /// Get a generator for a specific type, failing if none was registered
    pub fn lookup<T: 'static>(&self) -> Result<&BoxedGenerator<T>, PropertyError> {
        self.get::<T>().ok_or_else(PropertyError::unregistered::<T>)
    }

    /// Check if a generator is registered for a specific type
    pub fn contains<T: 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.generators.contains_key(&type_id)
    }

    /// Remove a generator for a specific type
    pub fn remove<T: 'static>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();
        self.generators.remove(&type_id).is_some()
    }

    /// Get the number of registered generators
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("len", &self.generators.len())
            .finish()
    }
}

/// A wrapper that stores generators in a type-erased way
pub struct BoxedGenerator<T> {
    generator: Box<dyn Generator<T> + Send + Sync>,
}

impl<T> BoxedGenerator<T> {
    /// Create a new boxed generator
    pub fn new<G: Generator<T> + Send + Sync + 'static>(generator: G) -> Self {
        Self {
            generator: Box::new(generator),
        }
    }
}

impl<T> Generator<T> for BoxedGenerator<T> {
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> T {
        self.generator.generate(rng, config)
    }
}

/// A simple generator that always produces the same value
#[derive(Debug, Clone)]
pub struct ConstantGenerator<T> {
    value: T,
}

impl<T: Clone> ConstantGenerator<T> {
    /// Create a new constant generator
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone> Generator<T> for ConstantGenerator<T> {
    fn generate(&self, _rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> T {
        self.value.clone()
    }
}

/// A generator that chooses randomly from a collection of values
#[derive(Debug, Clone)]
pub struct OneOfGenerator<T> {
    values: Vec<T>,
}

impl<T: Clone> OneOfGenerator<T> {
    /// Create a new one-of generator
    pub fn new(values: Vec<T>) -> Self {
        if values.is_empty() {
            panic!("OneOfGenerator cannot be created with empty values");
        }
        Self { values }
    }
}

impl<T: Clone> Generator<T> for OneOfGenerator<T> {
    fn generate(&self, rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> T {
        use rand::Rng;
        let index = rng.gen_range(0..self.values.len());
        self.values[index].clone()
    }
}
