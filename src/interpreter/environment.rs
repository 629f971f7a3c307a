use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{FuncDefinition, StructDefinition},
    error::RuntimeError,
    interpreter::{evaluator::EvalResult, value::Value},
};

/// One scope frame.
#[derive(Debug, Default)]
struct Frame {
    bindings:  HashMap<String, Value>,
    functions: HashMap<String, Rc<FuncDefinition>>,
    structs:   HashMap<String, Rc<StructDefinition>>,
    parent:    Option<usize>,
}

/// The chain of scopes a program runs against.
///
/// Frames live in a stack owned by the evaluator. Index `0` is the global
/// frame, which lasts for the whole run; every user function call pushes one
/// frame whose parent is the frame that was active at the call site, and pops
/// it on return. Lookups start at the active frame and follow parent indices
/// outward.
///
/// # Example
/// ```
/// use npp::interpreter::{environment::Environment, value::Value};
///
/// let mut env = Environment::new();
/// env.define("x", Value::Integer(1));
///
/// env.push_frame();
/// env.define("y", Value::Integer(2));
/// assert!(env.exists("x"));
/// env.set("x", Value::Integer(5), 1).unwrap();
/// env.pop_frame();
///
/// assert_eq!(env.get("x", 1).unwrap(), Value::Integer(5));
/// assert!(!env.exists("y"));
/// ```
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only the empty global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::default()] }
    }

    /// Number of frames currently on the stack, the global frame included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Pushes a frame parented to the currently active frame and makes it
    /// active.
    pub fn push_frame(&mut self) {
        let parent = Some(self.active());
        self.frames.push(Frame { parent,
                                 ..Frame::default() });
    }

    /// Discards the active frame, making its parent active again. The global
    /// frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    fn active(&self) -> usize {
        self.frames.len() - 1
    }

    /// Iterates the active frame and then each parent outward.
    fn chain(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.frames.last(), |frame| {
            frame.parent.and_then(|index| self.frames.get(index))
        })
    }

    /// Binds `name` in the active frame, replacing any binding it had there.
    pub fn define(&mut self, name: &str, value: Value) {
        let index = self.active();
        self.frames[index].bindings.insert(name.to_string(), value);
    }

    /// Looks `name` up along the scope chain.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.chain().find_map(|frame| frame.bindings.get(name))
    }

    /// Returns a copy of the nearest binding of `name`.
    ///
    /// # Errors
    /// `UndefinedVariable` if no frame in the chain binds `name`.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Overwrites the nearest existing binding of `name`. Never creates one.
    ///
    /// # Errors
    /// `UndefinedVariable` if no frame in the chain binds `name`.
    pub fn set(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let mut index = Some(self.active());
        while let Some(i) = index {
            let frame = &mut self.frames[i];
            if let Some(slot) = frame.bindings.get_mut(name) {
                *slot = value;
                return Ok(());
            }
            index = frame.parent;
        }
        Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                              line })
    }

    /// Returns `true` if `name` is bound anywhere in the chain.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registers a function in the active frame.
    pub fn define_function(&mut self, function: Rc<FuncDefinition>) {
        let index = self.active();
        self.frames[index].functions.insert(function.name.clone(), function);
    }

    /// Resolves a function along the chain.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<Rc<FuncDefinition>> {
        self.chain().find_map(|frame| frame.functions.get(name)).cloned()
    }

    /// Returns `true` if a function named `name` is visible.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.chain().any(|frame| frame.functions.contains_key(name))
    }

    /// Registers a struct type in the active frame.
    pub fn define_struct(&mut self, definition: Rc<StructDefinition>) {
        let index = self.active();
        self.frames[index].structs.insert(definition.name.clone(), definition);
    }

    /// Resolves a struct type along the chain.
    #[must_use]
    pub fn get_struct(&self, name: &str) -> Option<Rc<StructDefinition>> {
        self.chain().find_map(|frame| frame.structs.get(name)).cloned()
    }

    /// Returns `true` if a struct type named `name` is visible.
    #[must_use]
    pub fn has_struct(&self, name: &str) -> bool {
        self.chain().any(|frame| frame.structs.contains_key(name))
    }
}
