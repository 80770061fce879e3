// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Partial application
//!
//! A [`Function`] declares how many arguments it needs. Currying it yields a
//! [`Curried`] accumulator: calling it with fewer arguments than the arity
//! returns a new accumulator holding the arguments so far, calling it with
//! enough (or more) invokes the function.
//!
//! ```
//! use number_input::core::curry::{curry, Function};
//!
//! let add = curry(Function::binary(|x: i64, y: i64| x + y));
//! let increment = add.call([1]).partial().unwrap();
//! assert_eq!(increment.call([41]).complete(), Some(42));
//! assert_eq!(add.call([1, 2]).complete(), Some(3));
//! ```
//!
//! Arguments share one type `A`; heterogeneous call sites use an enum
//! such as [`Value`](crate::core::types::Value).

use std::fmt;
use std::rc::Rc;

type Body<A, R> = Rc<dyn Fn(Vec<A>) -> R>;

/// A function with a declared arity
pub struct Function<A, R> {
    body: Body<A, R>,
    arity: usize,
}

impl<A, R> Clone for Function<A, R> {
    fn clone(&self) -> Self {
        Self {
            body: Rc::clone(&self.body),
            arity: self.arity,
        }
    }
}

impl<A: 'static, R: 'static> Function<A, R> {
    /// Variadic function with an explicit arity
    ///
    /// The body receives every supplied argument, including any beyond the
    /// arity.
    pub fn new(arity: usize, body: impl Fn(Vec<A>) -> R + 'static) -> Self {
        Self {
            body: Rc::new(body),
            arity,
        }
    }

    pub fn nullary(body: impl Fn() -> R + 'static) -> Self {
        Self::new(0, move |_| body())
    }
}

impl<A: Default + 'static, R: 'static> Function<A, R> {
    /// One-argument function; arguments past the first are ignored
    pub fn unary(body: impl Fn(A) -> R + 'static) -> Self {
        Self::new(1, move |args| {
            let mut args = args.into_iter();
            body(args.next().unwrap_or_default())
        })
    }

    /// Two-argument function; arguments past the second are ignored
    pub fn binary(body: impl Fn(A, A) -> R + 'static) -> Self {
        Self::new(2, move |args| {
            let mut args = args.into_iter();
            let first = args.next().unwrap_or_default();
            let second = args.next().unwrap_or_default();
            body(first, second)
        })
    }

    /// Three-argument function; arguments past the third are ignored
    pub fn ternary(body: impl Fn(A, A, A) -> R + 'static) -> Self {
        Self::new(3, move |args| {
            let mut args = args.into_iter();
            let first = args.next().unwrap_or_default();
            let second = args.next().unwrap_or_default();
            let third = args.next().unwrap_or_default();
            body(first, second, third)
        })
    }
}

impl<A, R> Function<A, R> {
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Overrides the declared arity
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }
}

/// Order in which accumulated arguments reach the function
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Call order
    Left,
    /// Reverse of call order
    Right,
}

/// Argument accumulator produced by [`curry`] / [`curry_right`]
///
/// Every call returns a fresh accumulator; the receiver is never mutated,
/// so one partially applied value can be reused for many calls.
pub struct Curried<A, R> {
    function: Function<A, R>,
    direction: Direction,
    args: Vec<A>,
}

impl<A: Clone, R> Clone for Curried<A, R> {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            direction: self.direction,
            args: self.args.clone(),
        }
    }
}

impl<A, R> fmt::Debug for Curried<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curried")
            .field("arity", &self.function.arity)
            .field("direction", &self.direction)
            .field("supplied", &self.args.len())
            .finish()
    }
}

/// Outcome of calling a [`Curried`]
pub enum Applied<A, R> {
    /// Still waiting for arguments
    Partial(Curried<A, R>),
    /// The function ran
    Complete(R),
}

impl<A, R> Applied<A, R> {
    pub fn complete(self) -> Option<R> {
        match self {
            Applied::Complete(result) => Some(result),
            Applied::Partial(_) => None,
        }
    }

    pub fn partial(self) -> Option<Curried<A, R>> {
        match self {
            Applied::Partial(curried) => Some(curried),
            Applied::Complete(_) => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Applied::Complete(_))
    }
}

impl<A: Clone, R> Curried<A, R> {
    /// Supplies arguments; invokes the function once the arity is met
    pub fn call(&self, args: impl IntoIterator<Item = A>) -> Applied<A, R> {
        let supplied = self.with_args(args);
        if supplied.args.len() < supplied.function.arity {
            return Applied::Partial(supplied);
        }

        let mut args = supplied.args;
        if supplied.direction == Direction::Right {
            args.reverse();
        }
        Applied::Complete((supplied.function.body)(args))
    }

    /// Supplies arguments without invoking, whatever the arity
    ///
    /// Used to fix leading arguments (settings) ahead of a later call.
    pub fn bind(&self, args: impl IntoIterator<Item = A>) -> Self {
        self.with_args(args)
    }

    fn with_args(&self, args: impl IntoIterator<Item = A>) -> Self {
        let mut all = self.args.clone();
        all.extend(args);
        Self {
            function: self.function.clone(),
            direction: self.direction,
            args: all,
        }
    }
}

impl<A, R> Curried<A, R> {
    /// Arguments still needed before the function runs
    pub fn remaining(&self) -> usize {
        self.function.arity.saturating_sub(self.args.len())
    }

    pub fn supplied(&self) -> &[A] {
        &self.args
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether both accumulators wrap the same function
    pub fn same_function(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.function.body, &other.function.body)
    }
}

/// Anything that can be turned into a [`Curried`]
///
/// Already curried values pass through unchanged, which makes currying
/// idempotent without tagging the function itself.
pub trait IntoCurried<A, R> {
    fn into_curried(self, direction: Direction) -> Curried<A, R>;
}

impl<A, R> IntoCurried<A, R> for Function<A, R> {
    fn into_curried(self, direction: Direction) -> Curried<A, R> {
        Curried {
            function: self,
            direction,
            args: Vec::new(),
        }
    }
}

impl<A, R> IntoCurried<A, R> for Curried<A, R> {
    fn into_curried(self, _direction: Direction) -> Curried<A, R> {
        self
    }
}

/// Left-accumulating curry
pub fn curry<A, R>(function: impl IntoCurried<A, R>) -> Curried<A, R> {
    function.into_curried(Direction::Left)
}

/// Right-accumulating curry: the collected arguments are reversed before
/// the function runs, so `f(1)(2, 3)` calls `f(3, 2, 1)`
pub fn curry_right<A, R>(function: impl IntoCurried<A, R>) -> Curried<A, R> {
    function.into_curried(Direction::Right)
}
