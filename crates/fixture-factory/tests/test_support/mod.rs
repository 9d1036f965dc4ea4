//! Registered sample types shared by the fixture-factory integration tests.

use std::collections::{HashMap, LinkedList};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use fixture_factory::{
    Arguments, Constructor, Fixture, InterfaceDef, Locale, Parameter, TypeDescriptor, Variant,
    fixture,
};

/// A generic type whose constructor only uses its second and third formals.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair<A, K, B> {
    pub k: K,
    pub b: B,
    marker: PhantomData<fn() -> A>,
}

impl<A: Fixture, K: Fixture, B: Fixture> Fixture for Pair<A, K, B> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>("Pair")
            .type_parameters(&["A", "K", "B"])
            .arguments(vec![A::descriptor(), K::descriptor(), B::descriptor()])
            .constructor(Constructor::new(
                vec![
                    Parameter::type_variable("k", "K"),
                    Parameter::type_variable("b", "B"),
                ],
                |arguments: &mut Arguments| {
                    Ok(Self {
                        k: arguments.take("k")?,
                        b: arguments.take("b")?,
                        marker: PhantomData,
                    })
                },
            ))
            .build()
    }
}

/// The enclosing type of [`Car`].
#[derive(Debug, Clone, PartialEq)]
pub struct Garage<T> {
    pub label: T,
}

impl<T: Fixture> Fixture for Garage<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>("Garage")
            .type_parameters(&["T"])
            .arguments(vec![T::descriptor()])
            .constructor(Constructor::new(
                vec![Parameter::type_variable("label", "T")],
                |arguments: &mut Arguments| {
                    Ok(Self {
                        label: arguments.take("label")?,
                    })
                },
            ))
            .build()
    }
}

/// A nested type that needs a fully built [`Garage`] to exist.
///
/// Its type arguments are its own `W` followed by the garage's `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Car<W, T> {
    pub wheels: W,
    pub garage: Garage<T>,
}

impl<W: Fixture, T: Fixture> Fixture for Car<W, T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>("Car")
            .type_parameters(&["W"])
            .arguments(vec![W::descriptor(), T::descriptor()])
            .constructor(Constructor::new(
                vec![
                    Parameter::receiver::<Garage<T>>("garage"),
                    Parameter::type_variable("wheels", "W"),
                ],
                |arguments: &mut Arguments| {
                    Ok(Self {
                        wheels: arguments.take("wheels")?,
                        garage: arguments.take("garage")?,
                    })
                },
            ))
            .build()
    }
}

/// A sum type with two payload variants and one payload-free variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { radius: f64 },
    Square(u32),
    Empty,
}

impl Shape {
    fn circle() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>("Shape::Circle")
            .constructor(Constructor::new(
                vec![Parameter::value::<f64>("radius")],
                |arguments: &mut Arguments| {
                    Ok(Self::Circle {
                        radius: arguments.take("radius")?,
                    })
                },
            ))
            .build()
    }

    fn square() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>("Shape::Square")
            .constructor(Constructor::new(
                vec![Parameter::value::<u32>("side")],
                |arguments: &mut Arguments| Ok(Self::Square(arguments.take("side")?)),
            ))
            .build()
    }
}

impl Fixture for Shape {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sum_type::<Self>("Shape")
            .variant(Variant::payload("Circle", Self::circle))
            .variant(Variant::payload("Square", Self::square))
            .variant(Variant::singleton("Empty", || Self::Empty))
            .build()
    }
}

/// A sum type whose only payload variant is registered as generic.
///
/// `Ready` declares its own type parameter `T`, so the default resolver
/// never picks it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pending,
    Ready(String),
}

impl Outcome {
    fn ready() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>("Outcome::Ready")
            .constructor(Constructor::new(
                vec![Parameter::value::<String>("value")],
                |arguments: &mut Arguments| Ok(Self::Ready(arguments.take("value")?)),
            ))
            .build()
    }
}

impl Fixture for Outcome {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sum_type::<Self>("Outcome")
            .variant(Variant::singleton("Pending", || Self::Pending))
            .variant(Variant::generic("Ready", &["T"], Self::ready))
            .build()
    }
}

/// A sum type whose only variant is itself a sum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Animal {
    Dog(i32),
}

impl Animal {
    fn pet() -> TypeDescriptor {
        TypeDescriptor::sum_type::<Self>("Animal::Pet")
            .variant(Variant::payload("Dog", Self::dog))
            .build()
    }

    fn dog() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>("Animal::Pet::Dog")
            .constructor(Constructor::new(
                vec![Parameter::value::<i32>("age")],
                |arguments: &mut Arguments| Ok(Self::Dog(arguments.take("age")?)),
            ))
            .build()
    }
}

impl Fixture for Animal {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sum_type::<Self>("Animal")
            .variant(Variant::payload("Pet", Self::pet))
            .build()
    }
}

/// A sum type without variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Never {}

impl Fixture for Never {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sum_type::<Self>("Never").build()
    }
}

/// A field-less enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
}

static COLORS: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

impl Fixture for Color {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::enumeration("Color", &COLORS)
    }
}

/// A unit struct with one shared value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin;

impl Fixture for Origin {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::singleton("Origin", || Self)
    }
}

/// A type with a rich constructor declared before a default one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub retries: u32,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            retries: 3,
            verbose: true,
        }
    }
}

impl Fixture for Settings {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>("Settings")
            .constructor(Constructor::new(
                vec![
                    Parameter::value::<u32>("retries"),
                    Parameter::value::<bool>("verbose"),
                ],
                |arguments: &mut Arguments| {
                    Ok(Self {
                        retries: arguments.take("retries")?,
                        verbose: arguments.take("verbose")?,
                    })
                },
            ))
            .constructor(Constructor::from_default::<Self>())
            .build()
    }
}

/// A plain record with a nullable field and an optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub nickname: Option<String>,
    pub age: u8,
    pub favourite: Color,
}

fixture!(Profile {
    name: String,
    nickname: Option<String>,
    age: u8 = 30,
    favourite: Color,
});

/// A record holding every supported container kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub items: Vec<String>,
    pub tags: LinkedList<char>,
    pub counts: HashMap<String, u32>,
    pub shared: Arc<[u8]>,
    pub lookup: Arc<HashMap<u8, bool>>,
}

fixture!(Inventory {
    items: Vec<String>,
    tags: LinkedList<char>,
    counts: HashMap<String, u32>,
    shared: Arc<[u8]>,
    lookup: Arc<HashMap<u8, bool>>,
});

/// A record holding every special library type.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub at: SystemTime,
    pub calendar: DateTime<Utc>,
    pub locale: Locale,
}

fixture!(Appointment {
    at: SystemTime,
    calendar: DateTime<Utc>,
    locale: Locale,
});

/// An abstract interface that is neither list-, map- nor sequence-like.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparator<T>(PhantomData<fn() -> T>);

impl<T: Fixture> Fixture for Comparator<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::interface::<Self>("Comparator", InterfaceDef::Unsupported)
            .with_arguments(vec![T::descriptor()])
    }
}

/// A record depending on the unsupported [`Comparator`] interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Sorter {
    pub order: Comparator<i32>,
}

fixture!(Sorter {
    order: Comparator<i32>,
});

/// A type whose parameter names a type variable it never declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stray {
    pub value: i32,
}

impl Fixture for Stray {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>("Stray")
            .constructor(Constructor::new(
                vec![Parameter::type_variable("value", "Q")],
                |arguments: &mut Arguments| {
                    Ok(Self {
                        value: arguments.take("value")?,
                    })
                },
            ))
            .build()
    }
}
