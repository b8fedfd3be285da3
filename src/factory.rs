//! Object construction and reset

use crate::errors::ResetError;

/// Capability of a pooled type to restore itself to its initial state.
///
/// Called by the pool on release and on recycling. The routine only sees the
/// object, never the pool, so it cannot call back into it.
pub trait Reset {
    fn reset(&mut self) -> Result<(), ResetError>;
}

/// Builds new pool members and resets returned ones.
///
/// Any `Fn() -> T` closure is a factory whose reset does nothing. Wrap a
/// constructor in [`Resetting`] when `T` implements [`Reset`].
///
/// # Examples
///
/// ```
/// use flexipool::ObjectFactory;
///
/// struct Buffers;
///
/// impl ObjectFactory<Vec<u8>> for Buffers {
///     fn create(&self) -> Vec<u8> {
///         Vec::with_capacity(1024)
///     }
///
///     fn reset(&self, obj: &mut Vec<u8>) -> Result<(), flexipool::ResetError> {
///         obj.clear();
///         Ok(())
///     }
/// }
///
/// let mut buf = Buffers.create();
/// buf.push(1);
/// Buffers.reset(&mut buf).unwrap();
/// assert!(buf.is_empty());
/// ```
pub trait ObjectFactory<T> {
    /// Creates one new instance.
    fn create(&self) -> T;

    /// Restores `obj` to its initial state before it is handed out again.
    fn reset(&self, _obj: &mut T) -> Result<(), ResetError> {
        Ok(())
    }
}

impl<T, F> ObjectFactory<T> for F
where
    F: Fn() -> T,
{
    fn create(&self) -> T {
        self()
    }
}

/// Factory for [`Reset`] types: builds with the wrapped constructor and
/// resets with [`Reset::reset`].
#[derive(Debug, Clone, Copy)]
pub struct Resetting<F>(pub F);

impl<T, F> ObjectFactory<T> for Resetting<F>
where
    T: Reset,
    F: Fn() -> T,
{
    fn create(&self) -> T {
        (self.0)()
    }

    fn reset(&self, obj: &mut T) -> Result<(), ResetError> {
        obj.reset()
    }
}
