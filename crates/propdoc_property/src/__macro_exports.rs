//! Items used by generated code. Not part of the public API.
#![doc(hidden)]

pub use serde_json::Value;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::{Properties, PropertyList, PropertyListCell, PropertyRegistry};

    pub struct __AutoRegisterFunc(pub fn(&mut PropertyRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut PropertyRegistry);
    }

    impl<T: Properties> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut PropertyRegistry) {
            registry.register::<T>();
        }
    }

    /// Present in a registry after [`__register_types`] iff `inventory`
    /// works on this platform.
    #[derive(Default)]
    pub struct __AvailFlag;

    impl Properties for __AvailFlag {
        fn property_list() -> &'static PropertyList<Self> {
            static CELL: PropertyListCell<__AvailFlag> = PropertyListCell::new();
            CELL.get_or_init(|| PropertyList::new([]))
        }
    }

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
    }

    pub fn __register_types(registry: &mut PropertyRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
