//! Render bound trees as C#-like text.
//!
//! The output is for humans (CLI output, snapshot tests), not for re-parsing. Synthesized locals have no names, so
//! they print as `temp<slot>`.

use super::{BoundBlock, BoundExpr, BoundExprKind, BoundStmt, LocalSymbol};
use crate::symbols::TypeEnvironment;

/// A buffer for building indented source text
#[derive(Debug)]
pub struct BodyWriter {
    buffer: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl BodyWriter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    /// Consume the writer and return the text
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Write one indented line
    pub fn line(&mut self, s: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_str);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write `{`, the indented contents produced by `f`, then `}`
    pub fn braced<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line("{");
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }
}

impl Default for BodyWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a block, braces included.
pub fn render_block(env: &dyn TypeEnvironment, block: &BoundBlock) -> String {
    let mut writer = BodyWriter::new();
    write_block(&mut writer, env, block);
    writer.finish()
}

/// Append a block to `writer`.
pub fn write_block(writer: &mut BodyWriter, env: &dyn TypeEnvironment, block: &BoundBlock) {
    writer.braced(|w| {
        for local in &block.locals {
            w.line(&format!("{} {};", env.display_name(local.ty), local_name(local)));
        }
        for stmt in &block.statements {
            w.line(&render_stmt(env, stmt));
        }
    });
}

pub fn render_stmt(env: &dyn TypeEnvironment, stmt: &BoundStmt) -> String {
    match stmt {
        BoundStmt::Expression(expr) => format!("{};", render_expr(env, expr)),
        BoundStmt::Return(None) => "return;".to_string(),
        BoundStmt::Return(Some(expr)) => format!("return {};", render_expr(env, expr)),
    }
}

pub fn render_expr(env: &dyn TypeEnvironment, expr: &BoundExpr) -> String {
    match &expr.kind {
        BoundExprKind::Parameter(p) => p.name.clone(),
        BoundExprKind::Local(local) => local_name(local),
        BoundExprKind::Call {
            receiver,
            method,
            arguments,
        } => {
            let method = env.method(*method);
            let target = match receiver {
                Some(r) => render_expr(env, r),
                None => env.display_name(method.containing_type),
            };
            format!("{}.{}({})", target, method.name, render_args(env, arguments))
        }
        BoundExprKind::ObjectCreation { arguments, .. } => {
            format!("new {}({})", env.display_name(expr.ty), render_args(env, arguments))
        }
        BoundExprKind::Assignment { target, value } => {
            format!("{} = {}", render_expr(env, target), render_expr(env, value))
        }
    }
}

fn render_args(env: &dyn TypeEnvironment, args: &[BoundExpr]) -> String {
    args.iter().map(|a| render_expr(env, a)).collect::<Vec<_>>().join(", ")
}

fn local_name(local: &LocalSymbol) -> String {
    format!("temp{}", local.slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{MethodSignature, SpecialType, TypeTable};

    #[test]
    fn renders_static_call_with_containing_type() {
        let mut table = TypeTable::new();
        let int = table.special_type(SpecialType::Int32);
        let program = table.define_class("Program");
        let main = table.define_method(program, MethodSignature::ordinary("Main", int).as_static());
        let call = BoundExpr::call(None, main, vec![], int);
        assert_eq!(render_expr(&table, &call), "Program.Main()");
    }

    #[test]
    fn renders_locals_before_statements() {
        let mut table = TypeTable::new();
        let void = table.special_type(SpecialType::Void);
        let script = table.define_class("Script");
        let ctor = table.define_method(script, MethodSignature::constructor(void));
        let local = LocalSymbol::temp(0, script);
        let block = BoundBlock::new(
            vec![local.clone()],
            vec![
                BoundStmt::Expression(BoundExpr::assignment(
                    BoundExpr::local(local),
                    BoundExpr::object_creation(ctor, vec![], script),
                )),
                BoundStmt::Return(None),
            ],
        );
        assert_eq!(
            render_block(&table, &block),
            "{\n    Script temp0;\n    temp0 = new Script();\n    return;\n}\n"
        );
    }
}
