use std::collections::HashMap;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Token,
};

/// What the checker remembers about a routine.
#[derive(Debug, Clone, PartialEq)]
pub struct FnSignature {
    pub params: Vec<Type>,
    pub return_type: Type,
    pub is_procedure: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Constant(Type),
    Variable(Type),
    Function(FnSignature),
}

impl Symbol {
    /// The name used for this kind of declaration in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Symbol::Constant(_) => "Constant",
            Symbol::Variable(_) => "Variable",
            Symbol::Function(_) => "Function / Procedure",
        }
    }
}

/// The names declared by one block.
#[derive(Debug, Default)]
pub struct Scope {
    pub consts: HashMap<String, Type>,
    pub vars: HashMap<String, Type>,
    pub funcs: HashMap<String, FnSignature>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn get(&self, name: &str) -> Option<Symbol> {
        if let Some(ty) = self.vars.get(name) {
            return Some(Symbol::Variable(*ty));
        }
        if let Some(ty) = self.consts.get(name) {
            return Some(Symbol::Constant(*ty));
        }
        self.funcs
            .get(name)
            .map(|signature| Symbol::Function(signature.clone()))
    }

    /// Adds `symbol` under `name` without checking for clashes.
    fn insert(&mut self, name: String, symbol: Symbol) {
        match symbol {
            Symbol::Constant(ty) => {
                self.consts.insert(name, ty);
            }
            Symbol::Variable(ty) => {
                self.vars.insert(name, ty);
            }
            Symbol::Function(signature) => {
                self.funcs.insert(name, signature);
            }
        }
    }
}

/// A stack of scopes, innermost first.
///
/// The table always holds a current scope; each analysed block pushes a scope
/// on entry and pops it on exit. Lookups walk from the innermost scope outward,
/// so an inner declaration shadows an outer one of the same name.
#[derive(Debug)]
pub struct SymbolTable {
    current: Scope,
    outer: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            current: Scope::new(),
            outer: Vec::new(),
        }
    }

    pub fn enter_scope(&mut self) {
        let enclosing = std::mem::take(&mut self.current);
        self.outer.push(enclosing);
    }

    /// Pops the innermost scope. The root scope is never popped.
    pub fn exit_scope(&mut self) -> Option<Scope> {
        let enclosing = self.outer.pop()?;
        Some(std::mem::replace(&mut self.current, enclosing))
    }

    /// The number of scopes on the stack, the root included.
    pub fn depth(&self) -> usize {
        self.outer.len() + 1
    }

    /// Declares `name` in the innermost scope.
    ///
    /// Any declaration of the same name in that scope is a clash, whatever its kind.
    pub fn declare(&mut self, name: &Token, symbol: Symbol) -> Result<(), Error> {
        if let Some(existing) = self.lookup(&name.value, true) {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    kind: existing.kind_name().to_string(),
                    name: name.value.clone(),
                },
                name.position,
            )
            .with_token(name.value.clone()));
        }

        self.current.insert(name.value.clone(), symbol);
        Ok(())
    }

    /// Finds the nearest declaration of `name`, or only the innermost one with `current_only`.
    pub fn lookup(&self, name: &str, current_only: bool) -> Option<Symbol> {
        if current_only {
            return self.current.get(name);
        }

        std::iter::once(&self.current)
            .chain(self.outer.iter().rev())
            .find_map(|scope| scope.get(name))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
