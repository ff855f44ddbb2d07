//! Non-owning references to externally owned GPU objects.
//!
//! Shaders, buffers, images and samplers are created and owned by other
//! subsystems (shader compiler, resource allocator). Pipeline descriptions and
//! descriptor bindings only borrow them through a [`Handle`], a weak reference
//! compared by identity. A handle whose target has been dropped is detected at
//! validation or realization time instead of dangling.
//!
//! # Example
//!
//! ```ignore
//! let shader: Arc<MyShader> = compiler.compile(source)?;
//! let handle = ShaderHandle::shader(&shader);
//! assert!(handle.is_alive());
//! drop(shader);
//! assert!(!handle.is_alive());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use crate::types::ShaderStage;

/// A compiled shader module provided by the shader compilation subsystem.
pub trait ShaderModule: Send + Sync + fmt::Debug {
    /// The stage this module was compiled for.
    fn stage(&self) -> ShaderStage;

    /// Optional debug label.
    fn label(&self) -> Option<&str> {
        None
    }
}

/// A GPU buffer owned by the resource allocator.
pub trait BufferResource: Send + Sync + fmt::Debug {
    /// Size of the buffer in bytes.
    fn size(&self) -> u64;
}

/// A GPU image owned by the resource allocator.
pub trait ImageResource: Send + Sync + fmt::Debug {}

/// A sampler object owned by the resource allocator.
pub trait SamplerResource: Send + Sync + fmt::Debug {}

/// Weak, identity-compared reference to an externally owned object.
pub struct Handle<T: ?Sized> {
    target: Weak<T>,
}

/// Handle to a shader module.
pub type ShaderHandle = Handle<dyn ShaderModule>;
/// Handle to a buffer.
pub type BufferHandle = Handle<dyn BufferResource>;
/// Handle to an image.
pub type ImageHandle = Handle<dyn ImageResource>;
/// Handle to a sampler.
pub type SamplerHandle = Handle<dyn SamplerResource>;

impl<T: ?Sized> Handle<T> {
    /// Create a handle from a weak reference.
    pub fn from_weak(target: Weak<T>) -> Self {
        Self { target }
    }

    /// Get a strong reference if the target still exists.
    pub fn upgrade(&self) -> Option<Arc<T>> {
        self.target.upgrade()
    }

    /// Check if the target still exists.
    pub fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Check if this handle refers to the given object.
    pub fn refers_to(&self, target: &Arc<T>) -> bool {
        std::ptr::addr_eq(self.target.as_ptr(), Arc::as_ptr(target))
    }

    fn address(&self) -> usize {
        self.target.as_ptr() as *const () as usize
    }
}

impl ShaderHandle {
    /// Create a handle to a shader module.
    pub fn shader<S: ShaderModule + 'static>(shader: &Arc<S>) -> Self {
        let target: Weak<S> = Arc::downgrade(shader);
        Self::from_weak(target)
    }

    /// Declared stage of the shader, if it is still alive.
    pub fn stage(&self) -> Option<ShaderStage> {
        self.upgrade().map(|shader| shader.stage())
    }
}

impl BufferHandle {
    /// Create a handle to a buffer.
    pub fn buffer<B: BufferResource + 'static>(buffer: &Arc<B>) -> Self {
        let target: Weak<B> = Arc::downgrade(buffer);
        Self::from_weak(target)
    }
}

impl ImageHandle {
    /// Create a handle to an image.
    pub fn image<I: ImageResource + 'static>(image: &Arc<I>) -> Self {
        let target: Weak<I> = Arc::downgrade(image);
        Self::from_weak(target)
    }
}

impl SamplerHandle {
    /// Create a handle to a sampler.
    pub fn sampler<S: SamplerResource + 'static>(sampler: &Arc<S>) -> Self {
        let target: Weak<S> = Arc::downgrade(sampler);
        Self::from_weak(target)
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}

impl<T: ?Sized> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.target, &other.target)
    }
}

impl<T: ?Sized> Eq for Handle<T> {}

impl<T: ?Sized> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl<T: ?Sized> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("address", &format_args!("{:#x}", self.address()))
            .field("alive", &self.is_alive())
            .finish()
    }
}

static_assertions::assert_impl_all!(ShaderHandle: Send, Sync);
static_assertions::assert_impl_all!(BufferHandle: Send, Sync);
static_assertions::assert_impl_all!(ImageHandle: Send, Sync);
static_assertions::assert_impl_all!(SamplerHandle: Send, Sync);
