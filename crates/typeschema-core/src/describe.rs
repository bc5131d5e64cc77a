//! The `Describe` trait and its implementations for standard types

use crate::descriptor::{NumberKind, TypeDescriptor, TypeKind, TypeRef};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// A type that can produce its own [`TypeDescriptor`]
///
/// Usually derived with `#[derive(Describe)]`. `describe` defaults to the
/// static descriptor; dynamic types such as `serde_json::Value` override it
/// to inspect the runtime value.
pub trait Describe {
    fn descriptor() -> TypeDescriptor;

    fn describe(&self) -> TypeDescriptor {
        Self::descriptor()
    }
}

impl TypeRef {
    /// Reference to the descriptor of `T`, resolved on demand
    pub fn of<T: Describe + ?Sized>() -> Self {
        TypeRef::Static(T::descriptor)
    }
}

macro_rules! describe_number {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::number(stringify!($ty), NumberKind::$kind)
                }
            }
        )*
    };
}

describe_number! {
    i8 => Byte, u8 => Byte,
    i16 => Short, u16 => Short,
    i32 => Integer, u32 => Integer,
    i64 => Long, u64 => Long, isize => Long, usize => Long,
    i128 => BigInteger, u128 => BigInteger,
    f32 => Float,
    f64 => Double,
}

impl Describe for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::boolean("bool")
    }
}

impl Describe for char {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new("char", TypeKind::Char)
    }
}

impl Describe for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::string("String")
    }
}

impl Describe for str {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::string("str")
    }
}

macro_rules! describe_sequence {
    ($($container:ident => $unique:expr),* $(,)?) => {
        $(
            impl<T: Describe> Describe for $container<T> {
                fn descriptor() -> TypeDescriptor {
                    let name = format!("{}<{}>", stringify!($container), T::descriptor().name);
                    TypeDescriptor::collection(name, TypeRef::of::<T>(), $unique)
                }
            }
        )*
    };
}

describe_sequence! {
    Vec => false,
    VecDeque => false,
    LinkedList => false,
    HashSet => true,
    BTreeSet => true,
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn descriptor() -> TypeDescriptor {
        let name = format!("[{}; {N}]", T::descriptor().name);
        TypeDescriptor::array(name, TypeRef::of::<T>())
    }
}

impl<T: Describe> Describe for [T] {
    fn descriptor() -> TypeDescriptor {
        let name = format!("[{}]", T::descriptor().name);
        TypeDescriptor::array(name, TypeRef::of::<T>())
    }
}

macro_rules! describe_map {
    ($($container:ident),*) => {
        $(
            impl<K: Describe, V: Describe> Describe for $container<K, V> {
                fn descriptor() -> TypeDescriptor {
                    let name = format!(
                        "{}<{}, {}>",
                        stringify!($container),
                        K::descriptor().name,
                        V::descriptor().name
                    );
                    TypeDescriptor::map(name, TypeRef::of::<K>(), TypeRef::of::<V>())
                }
            }
        )*
    };
}

describe_map!(HashMap, BTreeMap);

macro_rules! describe_transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $wrapper<T> {
                fn descriptor() -> TypeDescriptor {
                    T::descriptor()
                }

                fn describe(&self) -> TypeDescriptor {
                    T::describe(self)
                }
            }
        )*
    };
}

describe_transparent!(Box, Arc, Rc);

impl<T: Describe + ?Sized> Describe for &T {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }

    fn describe(&self) -> TypeDescriptor {
        T::describe(self)
    }
}

impl<T: Describe> Describe for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }

    fn describe(&self) -> TypeDescriptor {
        match self {
            Some(value) => value.describe(),
            None => T::descriptor(),
        }
    }
}

impl Describe for Value {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::other("serde_json::Value")
    }

    fn describe(&self) -> TypeDescriptor {
        match self {
            Value::Null => Self::descriptor(),
            Value::Bool(_) => bool::descriptor(),
            Value::Number(n) if n.is_f64() => f64::descriptor(),
            Value::Number(_) => i64::descriptor(),
            Value::String(_) => String::descriptor(),
            Value::Array(items) => {
                let element = match items.first() {
                    Some(first) => TypeRef::shared(first.describe()),
                    None => TypeRef::of::<Value>(),
                };
                TypeDescriptor::collection("Vec<serde_json::Value>", element, false)
            }
            Value::Object(_) => TypeDescriptor::map(
                "Map<String, serde_json::Value>",
                TypeRef::of::<String>(),
                TypeRef::of::<Value>(),
            ),
        }
    }
}
