//! Reflective class registry.
//!
//! Classes are looked up by fully-qualified name. Each `ClassDef` lists its
//! direct supertypes, static fields, declared instance fields, methods and
//! constructors. Methods are keyed by name and arity; a variadic entry
//! accepts any arity and is consulted when no fixed-arity entry matches.
//!
//! # Thread Safety
//! The registry is behind a `parking_lot::RwLock`, so embedders can register
//! classes through a shared `Arc<ClassRegistry>` at any time.

mod builtins;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use vouch_ir::{class_names, TypeRef};

use crate::object::RecordObject;
use crate::throwable::{class_not_found, null_pointer, Throwable};
use crate::value::Value;

/// A native method or constructor.
///
/// Instance methods receive the receiver as argument 0.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, Throwable> + Send + Sync>;

/// Overloads of one method name.
#[derive(Clone, Default)]
struct MethodSet {
    by_arity: Vec<(usize, NativeFn)>,
    variadic: Option<NativeFn>,
}

impl MethodSet {
    fn find(&self, arity: usize) -> Option<NativeFn> {
        self.by_arity
            .iter()
            .find(|(n, _)| *n == arity)
            .map(|(_, f)| Arc::clone(f))
            .or_else(|| self.variadic.clone())
    }
}

/// Definition of one class.
#[derive(Clone)]
pub struct ClassDef {
    name: Arc<str>,
    supertypes: Vec<Arc<str>>,
    static_fields: FxHashMap<Arc<str>, Value>,
    instance_fields: FxHashSet<Arc<str>>,
    methods: FxHashMap<Arc<str>, MethodSet>,
    static_methods: FxHashMap<Arc<str>, MethodSet>,
    constructors: Vec<(Vec<TypeRef>, NativeFn)>,
}

impl ClassDef {
    pub fn new(name: &str) -> Self {
        ClassDef {
            name: Arc::from(name),
            supertypes: Vec::new(),
            static_fields: FxHashMap::default(),
            instance_fields: FxHashSet::default(),
            methods: FxHashMap::default(),
            static_methods: FxHashMap::default(),
            constructors: Vec::new(),
        }
    }

    /// A record class: canonical constructor, one accessor method and one
    /// field per component.
    pub fn record(name: &str, components: &[(&str, TypeRef)]) -> Self {
        let names: Arc<[Arc<str>]> = components.iter().map(|(n, _)| Arc::from(*n)).collect();
        let class: Arc<str> = Arc::from(name);
        let params = components.iter().map(|(_, ty)| ty.clone()).collect();

        let ctor_names = Arc::clone(&names);
        let mut def = ClassDef::new(name).constructor(params, move |args| {
            let values = ctor_names.iter().cloned().zip(args.iter().cloned()).collect();
            Ok(Value::object(RecordObject::new(&class, values)))
        });
        for component in names.iter() {
            let field = Arc::clone(component);
            def = def.field(component).method(component, 0, move |args| {
                match args.first() {
                    Some(Value::Object(object)) => Ok(object.field(&field).unwrap_or(Value::Null)),
                    _ => Err(null_pointer()),
                }
            });
        }
        def
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.supertypes.iter().map(|s| &**s)
    }

    /// Add a direct supertype (superclass or interface).
    #[must_use]
    pub fn extends(mut self, supertype: &str) -> Self {
        self.supertypes.push(Arc::from(supertype));
        self
    }

    #[must_use]
    pub fn static_field(mut self, name: &str, value: Value) -> Self {
        self.static_fields.insert(Arc::from(name), value);
        self
    }

    /// Declare an instance field; its value comes from `HostObject::field`.
    #[must_use]
    pub fn field(mut self, name: &str) -> Self {
        self.instance_fields.insert(Arc::from(name));
        self
    }

    /// Instance method taking `arity` arguments besides the receiver.
    #[must_use]
    pub fn method<F>(mut self, name: &str, arity: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.methods
            .entry(Arc::from(name))
            .or_default()
            .by_arity
            .push((arity, Arc::new(f)));
        self
    }

    /// Instance method accepting any number of arguments.
    #[must_use]
    pub fn variadic_method<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.methods.entry(Arc::from(name)).or_default().variadic = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn static_method<F>(mut self, name: &str, arity: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.static_methods
            .entry(Arc::from(name))
            .or_default()
            .by_arity
            .push((arity, Arc::new(f)));
        self
    }

    #[must_use]
    pub fn variadic_static_method<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.static_methods.entry(Arc::from(name)).or_default().variadic = Some(Arc::new(f));
        self
    }

    /// Constructor with the given parameter types.
    #[must_use]
    pub fn constructor<F>(mut self, params: Vec<TypeRef>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.constructors.push((params, Arc::new(f)));
        self
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("supertypes", &self.supertypes)
            .field("static_fields", &self.static_fields.len())
            .field("methods", &self.methods.len())
            .field("static_methods", &self.static_methods.len())
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

/// Registry of host classes, shared between evaluations.
#[derive(Default)]
pub struct ClassRegistry {
    classes: RwLock<FxHashMap<Arc<str>, Arc<ClassDef>>>,
}

impl ClassRegistry {
    /// An empty registry. `java.lang.Object` is still treated as the root of
    /// every class hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in `java.lang` and
    /// `java.util` classes and the exception hierarchy.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtins::register_all(&registry);
        registry
    }

    /// Register (or replace) a class.
    pub fn register(&self, def: ClassDef) {
        tracing::trace!(class = %def.name, "registering class");
        self.classes.write().insert(Arc::clone(&def.name), Arc::new(def));
    }

    pub fn get(&self, name: &str) -> Option<Arc<ClassDef>> {
        self.classes.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        name == class_names::OBJECT || self.classes.read().contains_key(name)
    }

    /// `name` followed by all of its supertypes, breadth first, without
    /// duplicates. Unregistered names contribute only themselves.
    fn lineage(&self, name: &str) -> Vec<Arc<ClassDef>> {
        let classes = self.classes.read();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut queue: Vec<&str> = vec![name];
        let mut out = Vec::new();
        let mut next = 0;
        while let Some(&current) = queue.get(next) {
            next += 1;
            if !seen.insert(current) {
                continue;
            }
            if let Some(def) = classes.get(current) {
                out.push(Arc::clone(def));
                queue.extend(def.supertypes.iter().map(|s| &**s));
            }
        }
        if !seen.contains(class_names::OBJECT) {
            if let Some(object) = classes.get(class_names::OBJECT) {
                out.push(Arc::clone(object));
            }
        }
        out
    }

    /// Whether `class` is `target` or one of its subtypes.
    pub fn is_subclass(&self, class: &str, target: &str) -> bool {
        if class == target || target == class_names::OBJECT {
            return true;
        }
        self.lineage(class).iter().any(|def| &*def.name == target)
    }

    /// Instance method `name/arity` declared on `class` or inherited.
    pub fn find_method(&self, class: &str, name: &str, arity: usize) -> Option<NativeFn> {
        self.lineage(class)
            .iter()
            .find_map(|def| def.methods.get(name).and_then(|set| set.find(arity)))
    }

    /// Static method `name/arity` declared on `class` or a supertype.
    pub fn find_static_method(&self, class: &str, name: &str, arity: usize) -> Option<NativeFn> {
        self.lineage(class)
            .iter()
            .find_map(|def| def.static_methods.get(name).and_then(|set| set.find(arity)))
    }

    pub fn static_field(&self, class: &str, name: &str) -> Option<Value> {
        self.lineage(class)
            .iter()
            .find_map(|def| def.static_fields.get(name).cloned())
    }

    /// Class declaring the static field `name` that `class` resolves to.
    pub fn static_field_owner(&self, class: &str, name: &str) -> Option<Arc<str>> {
        self.lineage(class)
            .iter()
            .find(|def| def.static_fields.contains_key(name))
            .map(|def| Arc::clone(&def.name))
    }

    /// Class declaring the static method `name/arity` that `class` resolves
    /// to.
    pub fn static_method_owner(&self, class: &str, name: &str, arity: usize) -> Option<Arc<str>> {
        self.lineage(class)
            .iter()
            .find(|def| {
                def.static_methods
                    .get(name)
                    .is_some_and(|set| set.find(arity).is_some())
            })
            .map(|def| Arc::clone(&def.name))
    }

    pub fn has_instance_field(&self, class: &str, name: &str) -> bool {
        self.lineage(class)
            .iter()
            .any(|def| def.instance_fields.contains(name))
    }

    /// Constructor of `class` with exactly the given parameter types.
    pub fn find_constructor(&self, class: &str, params: &[TypeRef]) -> Option<NativeFn> {
        let def = self.get(class)?;
        def.constructors
            .iter()
            .find(|(declared, _)| declared.as_slice() == params)
            .map(|(_, f)| Arc::clone(f))
    }

    /// Make sure every class named by `ty` is known.
    pub fn check_type(&self, ty: &TypeRef) -> Result<(), Throwable> {
        match ty.deep_component() {
            TypeRef::Class(name) if !self.contains(name) => Err(class_not_found(name)),
            _ => Ok(()),
        }
    }

    /// `value instanceof ty`.
    ///
    /// Fails with `ClassNotFoundException` when `ty` names an unknown class.
    pub fn instance_of(&self, value: &Value, ty: &TypeRef) -> Result<bool, Throwable> {
        self.check_type(ty)?;
        Ok(self.is_instance(value, ty))
    }

    fn is_instance(&self, value: &Value, ty: &TypeRef) -> bool {
        match (value, ty) {
            (Value::Null, _) | (_, TypeRef::Primitive(_)) => false,
            (Value::Array(array), TypeRef::Array(component)) => {
                self.is_assignable(&array.component, component)
            }
            (_, TypeRef::Array(_)) => false,
            (Value::Array(_), TypeRef::Class(target)) => &**target == class_names::OBJECT,
            (_, TypeRef::Class(target)) => value
                .class_name()
                .is_some_and(|class| self.is_subclass(&class, target)),
        }
    }

    /// Whether a value of static type `from` may be stored as `to`.
    fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        match (from, to) {
            (TypeRef::Primitive(a), TypeRef::Primitive(b)) => a == b,
            (TypeRef::Array(a), TypeRef::Array(b)) => self.is_assignable(a, b),
            (TypeRef::Array(_), TypeRef::Class(name)) => &**name == class_names::OBJECT,
            (TypeRef::Class(a), TypeRef::Class(b)) => self.is_subclass(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.classes.read().len())
            .finish()
    }
}
