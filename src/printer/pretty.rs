use crate::{
    ast::{
        ast::{Block, ConstDecl, Declarations, FnDecl, Program, VarDecl},
        expressions::{
            BinaryExpr, Expr, FnCallExpr, IdentifierExpr, LiteralExpr, TypeCastExpr, UnaryExpr,
        },
        statements::{
            AssignStmt, CallStmt, CompoundStmt, ForStmt, IfStmt, ReadStmt, RepeatStmt, WhileStmt,
            WriteStmt,
        },
        visitor::Visitor,
    },
    lexer::tokens::TokenKind,
};

const INDENT: usize = 3;

/// Renders a tree back to Pascal source.
///
/// Binary expressions are fully parenthesised and implicit promotions show up
/// as `real(x)`-style casts. Every statement carries the semicolons its rule
/// demands, so a tree that was never analysed prints as source the parser
/// accepts again.
#[derive(Debug, Default)]
pub struct PrettyPrinter {
    out: String,
    level: usize,
}

impl PrettyPrinter {
    pub fn new() -> Self {
        PrettyPrinter::default()
    }

    pub fn print(program: &Program) -> String {
        let mut printer = PrettyPrinter::new();
        program.accept(&mut printer);
        printer.out.push('\n');
        printer.out
    }

    /// Starts a new line at the current indentation.
    fn new_line(&mut self, text: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(&" ".repeat(self.level * INDENT));
        self.out.push_str(text);
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn write_list(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            expr.accept(self);
        }
    }

    /// Writes `a, b, c: type`. The last declaration renders the type.
    fn write_group(&mut self, group: &[&VarDecl]) {
        if let Some((last, rest)) = group.split_last() {
            for decl in rest {
                self.write(&decl.name.value);
                self.write(", ");
            }
            last.accept(self);
        }
    }

    fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.level += 1;
        f(self);
        self.level -= 1;
    }
}

/// Groups declarations by type, in order of each type's first appearance.
fn group_by_type(vars: &[VarDecl]) -> Vec<Vec<&VarDecl>> {
    let mut groups: Vec<Vec<&VarDecl>> = Vec::new();
    for var in vars {
        match groups.iter_mut().find(|group| group[0].ty == var.ty) {
            Some(group) => group.push(var),
            None => groups.push(vec![var]),
        }
    }
    groups
}

/// Groups only neighbouring declarations, since parameter order is significant.
fn group_adjacent(params: &[VarDecl]) -> Vec<Vec<&VarDecl>> {
    let mut groups: Vec<Vec<&VarDecl>> = Vec::new();
    for param in params {
        match groups.last_mut() {
            Some(group) if group[0].ty == param.ty => group.push(param),
            _ => groups.push(vec![param]),
        }
    }
    groups
}

impl Visitor for PrettyPrinter {
    type Output = ();

    fn visit_program(&mut self, program: &Program) {
        self.new_line(&format!("program {};", program.name.value));
        program.block.accept(self);
        self.write(".");
    }

    fn visit_block(&mut self, block: &Block) {
        block.declarations.accept(self);
        block.body.accept(self);
    }

    fn visit_declarations(&mut self, declarations: &Declarations) {
        if !declarations.consts.is_empty() {
            self.new_line("const");
            self.indented(|printer| {
                for decl in &declarations.consts {
                    decl.accept(printer);
                }
            });
        }

        if !declarations.vars.is_empty() {
            self.new_line("var");
            self.indented(|printer| {
                for group in group_by_type(&declarations.vars) {
                    printer.new_line("");
                    printer.write_group(&group);
                    printer.write(";");
                }
            });
        }

        for decl in &declarations.funcs {
            decl.accept(self);
        }
    }

    fn visit_const_decl(&mut self, decl: &ConstDecl) {
        self.new_line(&format!("{} = ", decl.name.value));
        decl.value.accept(self);
        self.write(";");
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) {
        self.write(&format!("{}: {}", decl.name.value, decl.ty));
    }

    fn visit_fn_decl(&mut self, decl: &FnDecl) {
        let keyword = if decl.is_procedure { "procedure" } else { "function" };
        self.new_line(&format!("{} {}(", keyword, decl.name.value));
        for (i, group) in group_adjacent(&decl.params).iter().enumerate() {
            if i > 0 {
                self.write("; ");
            }
            self.write_group(group);
        }
        self.write(")");
        if !decl.is_procedure {
            self.write(&format!(": {}", decl.return_type));
        }
        self.write(";");

        decl.block.accept(self);
        self.write(";");
    }

    fn visit_compound_stmt(&mut self, stmt: &CompoundStmt) {
        self.new_line("begin");
        self.indented(|printer| {
            for stmt in &stmt.statements {
                stmt.accept(printer);
                if !printer.out.ends_with(';') {
                    printer.write(";");
                }
            }
        });
        self.new_line("end");
    }

    fn visit_write_stmt(&mut self, stmt: &WriteStmt) {
        self.new_line(if stmt.new_line { "writeln(" } else { "write(" });
        self.write_list(&stmt.exprs);
        self.write(")");
    }

    fn visit_assign_stmt(&mut self, stmt: &AssignStmt) {
        self.new_line(&format!("{} := ", stmt.name.value));
        stmt.expr.accept(self);
    }

    fn visit_read_stmt(&mut self, stmt: &ReadStmt) {
        let names: Vec<&str> = stmt.vars.iter().map(|var| var.value.as_str()).collect();
        self.new_line(&format!("read({});", names.join(", ")));
    }

    fn visit_call_stmt(&mut self, stmt: &CallStmt) {
        self.new_line(&format!("{}(", stmt.name.value));
        self.write_list(&stmt.arguments);
        self.write(")");
    }

    fn visit_if_stmt(&mut self, stmt: &IfStmt) {
        self.new_line("if ");
        stmt.condition.accept(self);
        self.write(" then");
        self.indented(|printer| {
            stmt.then_stmt.accept(printer);
            printer.write(";");
        });

        if let Some(else_stmt) = &stmt.else_stmt {
            self.new_line("else");
            self.indented(|printer| {
                else_stmt.accept(printer);
                printer.write(";");
            });
        }
    }

    fn visit_for_stmt(&mut self, stmt: &ForStmt) {
        self.new_line(&format!("for {} := ", stmt.var.value));
        stmt.start.accept(self);
        self.write(if stmt.descending { " downto " } else { " to " });
        stmt.end.accept(self);
        self.write(" do");
        self.indented(|printer| stmt.body.accept(printer));
    }

    fn visit_while_stmt(&mut self, stmt: &WhileStmt) {
        self.new_line("while ");
        stmt.condition.accept(self);
        self.write(" do");
        self.indented(|printer| {
            stmt.body.accept(printer);
            printer.write(";");
        });
    }

    fn visit_repeat_stmt(&mut self, stmt: &RepeatStmt) {
        self.new_line("repeat");
        self.indented(|printer| {
            for stmt in &stmt.statements {
                stmt.accept(printer);
                printer.write(";");
            }
        });
        self.new_line("until ");
        stmt.condition.accept(self);
    }

    fn visit_literal(&mut self, expr: &LiteralExpr) {
        self.write(&expr.value.to_string());
    }

    fn visit_identifier(&mut self, expr: &IdentifierExpr) {
        self.write(&expr.name.value);
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) {
        if expr.operator.kind == TokenKind::Not {
            self.write("not ");
        } else {
            self.write(&expr.operator.value);
        }
        expr.expr.accept(self);
    }

    fn visit_binary(&mut self, expr: &BinaryExpr) {
        self.write("(");
        expr.left.accept(self);
        self.write(&format!(" {} ", expr.operator.value.to_lowercase()));
        expr.right.accept(self);
        self.write(")");
    }

    fn visit_fn_call(&mut self, expr: &FnCallExpr) {
        self.write(&format!("{}(", expr.name.value));
        self.write_list(&expr.arguments);
        self.write(")");
    }

    fn visit_type_cast(&mut self, expr: &TypeCastExpr) {
        self.write(&format!("{}(", expr.ty));
        expr.expr.accept(self);
        self.write(")");
    }
}
