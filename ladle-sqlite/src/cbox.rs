use std::ops::{Deref, DerefMut};

pub(crate) trait NullCheck {
    fn is_null(&self) -> bool;
}

impl<T> NullCheck for *const T {
    fn is_null(&self) -> bool {
        (*self as *const T).is_null()
    }
}

impl<T> NullCheck for *mut T {
    fn is_null(&self) -> bool {
        (*self as *const T).is_null()
    }
}

/// Owns a sqlite handle and releases it with `dealloc` unless it is null.
#[derive(Debug)]
pub(crate) struct CBox<T: NullCheck> {
    pub(crate) ptr: T,
    dealloc: fn(T),
}

impl<T: NullCheck> CBox<T> {
    pub fn new(ptr: T, dealloc: fn(T)) -> Self {
        Self { ptr, dealloc }
    }
}

impl<T: NullCheck> Drop for CBox<T> {
    fn drop(&mut self) {
        if !NullCheck::is_null(&self.ptr) {
            unsafe {
                (self.dealloc)(std::ptr::read(&self.ptr as *const T));
            }
        }
    }
}

impl<T: NullCheck> Deref for CBox<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.ptr
    }
}

impl<T: NullCheck> DerefMut for CBox<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ptr
    }
}

#[cfg(test)]
mod tests {
    use crate::cbox::CBox;
    use std::{ptr, sync::atomic::{AtomicUsize, Ordering}};

    #[test]
    fn cbox_raw_pointer() {
        static DESTROYED: AtomicUsize = AtomicUsize::new(0);
        let v = 123;
        let ptr: *const i32 = &v;
        {
            let ptr = CBox::new(ptr::null::<i32>(), |_| {
                DESTROYED.fetch_add(1, Ordering::Relaxed);
            });
            assert_eq!(*ptr, ptr::null());
        }
        assert_eq!(DESTROYED.load(Ordering::Relaxed), 0);
        {
            let ptr = CBox::new(ptr, |_| {
                DESTROYED.fetch_add(1, Ordering::Relaxed);
            });
            assert_eq!(unsafe { **ptr }, 123);
            assert_eq!(DESTROYED.load(Ordering::Relaxed), 0);
        }
        assert_eq!(DESTROYED.load(Ordering::Relaxed), 1);
    }
}
