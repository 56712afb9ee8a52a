//! Shared model fixtures for unit tests.

use std::any::Any;

use crate::member::{AccessError, Bindable, Member, MemberKind, TypeMeta};

crate::bindable! {
  #[derive(Debug, Default, Clone, PartialEq)]
  pub struct Address {
    pub street: String,
    pub city: String,
  }
}

crate::bindable! {
  #[derive(Debug, Default, Clone, PartialEq)]
  pub struct Person {
    pub name: String,
    pub age: u32,
    #[nested] pub home: Option<Address>,
  }
}

crate::bindable! {
  #[derive(Debug, Default)]
  pub struct Engine {
    pub horsepower: u32,
  }
}

crate::bindable! {
  #[derive(Debug, Default)]
  pub struct Car {
    pub make: String,
    #[nested] pub engine: Engine,
  }
}

crate::bindable! {
  #[derive(Debug, Default)]
  pub struct Garage {
    pub label: String,
    #[nested] pub car: Option<Car>,
  }
}

// Self-recursive model: the `next` member can never be traversed.
crate::bindable! {
  #[derive(Debug, Default)]
  pub struct Chain {
    pub label: String,
    #[nested] pub next: Option<Chain>,
  }
}

// Mutually recursive pair: Pong's `ping` member refers back to Ping.
crate::bindable! {
  #[derive(Debug, Default)]
  pub struct Ping {
    pub tag: String,
    #[nested] pub pong: Option<Pong>,
  }
}

crate::bindable! {
  #[derive(Debug, Default)]
  pub struct Pong {
    pub tag: String,
    #[nested] pub ping: Option<Ping>,
  }
}

// Two unrelated branches whose leaves share a simple name and type.
crate::bindable! {
  #[derive(Debug, Default)]
  pub struct Billing {
    pub email: String,
  }
}

crate::bindable! {
  #[derive(Debug, Default)]
  pub struct Shipping {
    pub email: String,
  }
}

crate::bindable! {
  #[derive(Debug, Default)]
  pub struct Order {
    pub id: u64,
    #[nested] pub billing: Option<Billing>,
    #[nested] pub shipping: Option<Shipping>,
  }
}

/// A model whose hand-written metadata reports two members with the same
/// name, producing a canonical-path collision. The macro cannot express
/// this (struct fields are unique), so the impl is written out.
#[derive(Debug, Default)]
pub struct Clash {
  pub a: String,
  pub b: String,
}

impl Bindable for Clash {
  fn members() -> Vec<Member> {
    fn set_a(owner: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
      let owner = owner.downcast_mut::<Clash>().ok_or(AccessError::WrongOwner)?;
      let value = value.downcast::<String>().map_err(|_| AccessError::ValueMismatch)?;
      owner.a = *value;
      Ok(())
    }

    fn set_b(owner: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
      let owner = owner.downcast_mut::<Clash>().ok_or(AccessError::WrongOwner)?;
      let value = value.downcast::<String>().map_err(|_| AccessError::ValueMismatch)?;
      owner.b = *value;
      Ok(())
    }

    fn default_value() -> Box<dyn Any> {
      Box::new(String::default())
    }

    vec![
      Member {
        name: "value",
        value_type: TypeMeta::of::<String>(),
        kind: MemberKind::Leaf { set: set_a, default: default_value },
      },
      Member {
        name: "value",
        value_type: TypeMeta::of::<String>(),
        kind: MemberKind::Leaf { set: set_b, default: default_value },
      },
    ]
  }
}
