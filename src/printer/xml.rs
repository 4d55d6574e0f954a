use crate::ast::{
    ast::{Block, ConstDecl, Declarations, FnDecl, Program, VarDecl},
    expressions::{BinaryExpr, FnCallExpr, IdentifierExpr, LiteralExpr, TypeCastExpr, UnaryExpr},
    statements::{
        AssignStmt, CallStmt, CompoundStmt, ForStmt, IfStmt, ReadStmt, RepeatStmt, WhileStmt,
        WriteStmt,
    },
    types::Type,
    visitor::Visitor,
};

/// One XML element with its attributes in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Element {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    /// Adds a `Type` attribute once the node has been typed.
    pub fn typed(self, ty: Option<Type>) -> Self {
        match ty {
            Some(ty) => self.attr("Type", ty),
            None => self,
        }
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn render(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", key, escape(value)));
        }

        if self.children.is_empty() {
            out.push_str(" />\n");
            return;
        }

        out.push_str(">\n");
        for child in &self.children {
            child.render(depth + 1, out);
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("</{}>\n", self.name));
    }
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Serialises a tree as an XML document, one element per node.
#[derive(Debug, Default)]
pub struct XmlWriter;

impl XmlWriter {
    pub fn write(program: &Program) -> String {
        let root = program.accept(&mut XmlWriter);
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        root.render(0, &mut out);
        out
    }
}

impl Visitor for XmlWriter {
    type Output = Element;

    fn visit_program(&mut self, program: &Program) -> Element {
        Element::new("Program")
            .attr("Name", &program.name.value)
            .child(program.block.accept(self))
    }

    fn visit_block(&mut self, block: &Block) -> Element {
        Element::new("Block")
            .child(block.declarations.accept(self))
            .child(block.body.accept(self))
    }

    fn visit_declarations(&mut self, declarations: &Declarations) -> Element {
        let mut element = Element::new("Declarations");
        for decl in &declarations.consts {
            element = element.child(decl.accept(self));
        }
        for decl in &declarations.vars {
            element = element.child(decl.accept(self));
        }
        for decl in &declarations.funcs {
            element = element.child(decl.accept(self));
        }
        element
    }

    fn visit_const_decl(&mut self, decl: &ConstDecl) -> Element {
        Element::new("Const")
            .attr("Name", &decl.name.value)
            .child(decl.value.accept(self))
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) -> Element {
        Element::new("Var")
            .attr("Name", &decl.name.value)
            .attr("Type", decl.ty)
    }

    fn visit_fn_decl(&mut self, decl: &FnDecl) -> Element {
        let element = if decl.is_procedure {
            Element::new("Procedure").attr("Name", &decl.name.value)
        } else {
            Element::new("Function")
                .attr("Name", &decl.name.value)
                .attr("Return", decl.return_type)
        };

        let params: Vec<Element> = decl.params.iter().map(|param| param.accept(self)).collect();
        element
            .child(Element::new("Params").children(params))
            .child(decl.block.accept(self))
    }

    fn visit_compound_stmt(&mut self, stmt: &CompoundStmt) -> Element {
        let statements: Vec<Element> = stmt.statements.iter().map(|s| s.accept(self)).collect();
        Element::new("Compound").children(statements)
    }

    fn visit_write_stmt(&mut self, stmt: &WriteStmt) -> Element {
        let exprs: Vec<Element> = stmt.exprs.iter().map(|e| e.accept(self)).collect();
        Element::new("Write")
            .attr("NewLine", stmt.new_line)
            .children(exprs)
    }

    fn visit_assign_stmt(&mut self, stmt: &AssignStmt) -> Element {
        Element::new("Assign")
            .attr("Name", &stmt.name.value)
            .child(stmt.expr.accept(self))
    }

    fn visit_read_stmt(&mut self, stmt: &ReadStmt) -> Element {
        Element::new("Read").children(
            stmt.vars
                .iter()
                .map(|var| Element::new("Ident").attr("Name", &var.value)),
        )
    }

    fn visit_call_stmt(&mut self, stmt: &CallStmt) -> Element {
        let arguments: Vec<Element> = stmt.arguments.iter().map(|e| e.accept(self)).collect();
        Element::new("Call")
            .attr("Name", &stmt.name.value)
            .children(arguments)
    }

    fn visit_if_stmt(&mut self, stmt: &IfStmt) -> Element {
        let mut element = Element::new("If")
            .child(stmt.condition.accept(self))
            .child(stmt.then_stmt.accept(self));
        if let Some(else_stmt) = &stmt.else_stmt {
            element = element.child(else_stmt.accept(self));
        }
        element
    }

    fn visit_for_stmt(&mut self, stmt: &ForStmt) -> Element {
        Element::new("For")
            .attr("Var", &stmt.var.value)
            .attr("Direction", if stmt.descending { "downto" } else { "to" })
            .child(stmt.start.accept(self))
            .child(stmt.end.accept(self))
            .child(stmt.body.accept(self))
    }

    fn visit_while_stmt(&mut self, stmt: &WhileStmt) -> Element {
        Element::new("While")
            .child(stmt.condition.accept(self))
            .child(stmt.body.accept(self))
    }

    fn visit_repeat_stmt(&mut self, stmt: &RepeatStmt) -> Element {
        let statements: Vec<Element> = stmt.statements.iter().map(|s| s.accept(self)).collect();
        Element::new("Repeat")
            .children(statements)
            .child(stmt.condition.accept(self))
    }

    fn visit_literal(&mut self, expr: &LiteralExpr) -> Element {
        Element::new("Literal")
            .attr("Value", &expr.value.value)
            .typed(expr.ty)
    }

    fn visit_identifier(&mut self, expr: &IdentifierExpr) -> Element {
        Element::new("Ident")
            .attr("Name", &expr.name.value)
            .typed(expr.ty)
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) -> Element {
        Element::new("Unary")
            .attr("Op", expr.operator.kind)
            .typed(expr.ty)
            .child(expr.expr.accept(self))
    }

    fn visit_binary(&mut self, expr: &BinaryExpr) -> Element {
        Element::new("Binary")
            .attr("Op", expr.operator.kind)
            .typed(expr.ty)
            .child(expr.left.accept(self))
            .child(expr.right.accept(self))
    }

    fn visit_fn_call(&mut self, expr: &FnCallExpr) -> Element {
        let arguments: Vec<Element> = expr.arguments.iter().map(|e| e.accept(self)).collect();
        Element::new("FnCall")
            .attr("Name", &expr.name.value)
            .typed(expr.ty)
            .children(arguments)
    }

    fn visit_type_cast(&mut self, expr: &TypeCastExpr) -> Element {
        Element::new("TypeCast")
            .attr("Type", expr.ty)
            .child(expr.expr.accept(self))
    }
}
