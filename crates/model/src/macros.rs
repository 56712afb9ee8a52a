//! The `bindable!` model macro.
//!
//! `bindable!` defines a model struct and generates its binding metadata in
//! one place: the [`Bindable`](crate::member::Bindable) implementation that
//! enumerates the struct's writable members, and one typed
//! [`Selector`](crate::selector::Selector) constructor per field.
//!
//! Intermediate fields - fields traversed on the way to leaves rather than
//! written to - carry a leading `#[nested]` marker, which the macro strips
//! from the emitted struct. A nested field declared as a bare `Option<T>`
//! is an absent-capable intermediate: writes through it fail while the
//! option is `None`. Any other nested field type is an always-present
//! intermediate. The nested target type must itself be declared with
//! `bindable!` (or implement `Bindable` by hand).
//!
//! Grammar notes: every field ends with a comma, the `#[nested]` marker must
//! come before any other field attribute, and generic structs are not
//! supported.
//!
//! ```
//! use pathbind_model::{bindable, ModelCache};
//!
//! bindable! {
//!   #[derive(Debug, Default)]
//!   pub struct Address {
//!     pub street: String,
//!   }
//! }
//!
//! bindable! {
//!   #[derive(Debug, Default)]
//!   pub struct Person {
//!     pub name: String,
//!     #[nested] pub home: Option<Address>,
//!   }
//! }
//!
//! let cache = ModelCache::new();
//! let descriptor = cache.descriptor::<Person>().unwrap();
//! let paths: Vec<_> = descriptor.resolver().descriptors().map(|d| d.path().to_string()).collect();
//! assert_eq!(paths, ["name", "home.street"]);
//! ```

/// Declare a bindable model struct. See the [module docs](crate::macros).
#[macro_export]
macro_rules! bindable {
  // Public entry: a struct definition whose intermediate fields carry a
  // leading #[nested] marker.
  (
    $(#[$meta:meta])*
    $vis:vis struct $name:ident {
      $($fields:tt)*
    }
  ) => {
    $crate::bindable! {
      @parse
      meta = [ $(#[$meta])* ],
      vis = [ $vis ],
      name = $name,
      acc = [ ],
      rest = [ $($fields)* ]
    }
  };

  // Intermediate field with an absent-capable Option target.
  (
    @parse
    meta = [ $($meta:tt)* ],
    vis = [ $vis:vis ],
    name = $name:ident,
    acc = [ $($acc:tt)* ],
    rest = [ #[nested] $(#[$fattr:meta])* $fvis:vis $fname:ident : Option<$inner:ty> , $($rest:tt)* ]
  ) => {
    $crate::bindable! {
      @parse
      meta = [ $($meta)* ],
      vis = [ $vis ],
      name = $name,
      acc = [ $($acc)* { nested_opt [ $(#[$fattr])* ] [ $fvis ] $fname (Option<$inner>) ($inner) } ],
      rest = [ $($rest)* ]
    }
  };

  // Intermediate field that is always present.
  (
    @parse
    meta = [ $($meta:tt)* ],
    vis = [ $vis:vis ],
    name = $name:ident,
    acc = [ $($acc:tt)* ],
    rest = [ #[nested] $(#[$fattr:meta])* $fvis:vis $fname:ident : $fty:ty , $($rest:tt)* ]
  ) => {
    $crate::bindable! {
      @parse
      meta = [ $($meta)* ],
      vis = [ $vis ],
      name = $name,
      acc = [ $($acc)* { nested [ $(#[$fattr])* ] [ $fvis ] $fname ($fty) ($fty) } ],
      rest = [ $($rest)* ]
    }
  };

  // Leaf field.
  (
    @parse
    meta = [ $($meta:tt)* ],
    vis = [ $vis:vis ],
    name = $name:ident,
    acc = [ $($acc:tt)* ],
    rest = [ $(#[$fattr:meta])* $fvis:vis $fname:ident : $fty:ty , $($rest:tt)* ]
  ) => {
    $crate::bindable! {
      @parse
      meta = [ $($meta)* ],
      vis = [ $vis ],
      name = $name,
      acc = [ $($acc)* { leaf [ $(#[$fattr])* ] [ $fvis ] $fname ($fty) ($fty) } ],
      rest = [ $($rest)* ]
    }
  };

  // All fields consumed: emit the struct, the metadata, and the selectors.
  (
    @parse
    meta = [ $($meta:tt)* ],
    vis = [ $vis:vis ],
    name = $name:ident,
    acc = [ $({ $kind:ident [ $($fattr:tt)* ] [ $fvis:vis ] $fname:ident ($fty:ty) ($inner:ty) })* ],
    rest = [ ]
  ) => {
    $($meta)*
    $vis struct $name {
      $( $($fattr)* $fvis $fname : $fty, )*
    }

    impl $crate::member::Bindable for $name {
      fn members() -> ::std::vec::Vec<$crate::member::Member> {
        ::std::vec![
          $( $crate::bindable!(@member $name $kind $fname ($fty) ($inner)) ),*
        ]
      }
    }

    $( $crate::bindable!(@selector $name [ $fvis ] $fname ($inner)); )*
  };

  // Member record for a leaf field.
  (@member $model:ident leaf $fname:ident ($fty:ty) ($inner:ty)) => {
    $crate::member::Member {
      name: ::core::stringify!($fname),
      value_type: $crate::member::TypeMeta::of::<$fty>(),
      kind: $crate::member::MemberKind::Leaf {
        set: {
          fn set(
            owner: &mut dyn ::core::any::Any,
            value: ::std::boxed::Box<dyn ::core::any::Any>,
          ) -> ::core::result::Result<(), $crate::member::AccessError> {
            let owner = owner
              .downcast_mut::<$model>()
              .ok_or($crate::member::AccessError::WrongOwner)?;
            let value = value
              .downcast::<$fty>()
              .map_err(|_| $crate::member::AccessError::ValueMismatch)?;
            owner.$fname = *value;
            ::core::result::Result::Ok(())
          }
          set
        },
        default: {
          fn default_value() -> ::std::boxed::Box<dyn ::core::any::Any> {
            ::std::boxed::Box::new(<$fty as ::core::default::Default>::default())
          }
          default_value
        },
      },
    }
  };

  // Member record for an absent-capable intermediate.
  (@member $model:ident nested_opt $fname:ident ($fty:ty) ($inner:ty)) => {
    $crate::member::Member {
      name: ::core::stringify!($fname),
      value_type: $crate::member::TypeMeta::of::<$inner>(),
      kind: $crate::member::MemberKind::Nested {
        members: <$inner as $crate::member::Bindable>::members,
        get_mut: {
          fn get_mut<'a>(
            owner: &'a mut dyn ::core::any::Any,
          ) -> $crate::member::NestedAccess<'a> {
            match owner.downcast_mut::<$model>() {
              ::core::option::Option::Some(owner) => match owner.$fname.as_mut() {
                ::core::option::Option::Some(inner) => $crate::member::NestedAccess::Present(inner),
                ::core::option::Option::None => $crate::member::NestedAccess::Absent,
              },
              ::core::option::Option::None => $crate::member::NestedAccess::WrongOwner,
            }
          }
          get_mut
        },
      },
    }
  };

  // Member record for an always-present intermediate.
  (@member $model:ident nested $fname:ident ($fty:ty) ($inner:ty)) => {
    $crate::member::Member {
      name: ::core::stringify!($fname),
      value_type: $crate::member::TypeMeta::of::<$inner>(),
      kind: $crate::member::MemberKind::Nested {
        members: <$inner as $crate::member::Bindable>::members,
        get_mut: {
          fn get_mut<'a>(
            owner: &'a mut dyn ::core::any::Any,
          ) -> $crate::member::NestedAccess<'a> {
            match owner.downcast_mut::<$model>() {
              ::core::option::Option::Some(owner) => {
                $crate::member::NestedAccess::Present(&mut owner.$fname)
              }
              ::core::option::Option::None => $crate::member::NestedAccess::WrongOwner,
            }
          }
          get_mut
        },
      },
    }
  };

  // Typed selector constructor for a field.
  (@selector $model:ident [ $fvis:vis ] $fname:ident ($inner:ty)) => {
    impl $model {
      $fvis fn $fname() -> $crate::selector::Selector<$model, $inner> {
        $crate::selector::Selector::head(::core::stringify!($fname))
      }
    }
  };
}
