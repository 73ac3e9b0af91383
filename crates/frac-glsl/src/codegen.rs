//! Semantic tree → GLSL fragments.

use frac_lang::{
    builtins,
    ops::{AssignOp, BinaryOp, UnaryOp},
    semantic::{self, Expr, ExprKind, ExprList},
    util::indent,
    BuiltinDefinition, Definition, Definitions, Type, TAB_SIZE,
};
use indexmap::IndexMap;
use tracing::trace;

use crate::{
    error::{CodeGenerationError, GlslResult},
    template::{CodeTemplate, DEFAULT_TEMPLATE},
};

pub const DEFAULT_VAR_PREFIX: &str = "_";

/// Configuration for [`CodeGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Operator overloads by id (`<mul-complex>`, `<div-complex>`, `<pow-complex>`).
    pub definitions: Definitions,
    /// Prepended to user variable names and temporaries.
    pub var_prefix: String,
    /// Template text handed to every generated [`CodeTemplate`].
    pub template: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            definitions: builtins::operator_overloads(),
            var_prefix: DEFAULT_VAR_PREFIX.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// Lowers a semantic tree into GLSL statements.
///
/// Init expressions become the init block, body and predicate expressions
/// become the loop body, and the last generated loop line is lifted out as
/// the loop predicate. Call arguments and complex casts are spilled into
/// temporaries (`vec2 _0 = ...`) placed before the line that uses them.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    options: GeneratorOptions,
}

impl CodeGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        CodeGenerator { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn generate_code(&self, root: &semantic::Root) -> GlslResult<CodeTemplate> {
        trace!("generating code");

        let mut generation = Generation::new(&self.options);

        let mut init = Vec::new();
        generation.list(&root.init, &mut init)?;

        let mut body = Vec::new();
        generation.list(&root.main_loop.body, &mut body)?;
        generation.list(&root.main_loop.predicate, &mut body)?;

        let predicate = body
            .pop()
            .ok_or_else(|| CodeGenerationError::new("Loop is empty"))?;

        let mut template = CodeTemplate::default();
        template.template = self.options.template.clone();
        template.functions = generation.used.into_values().filter_map(|def| def.code).collect();
        template.init = join_lines(&init, TAB_SIZE);
        template.loop_body = join_lines(&body, 2 * TAB_SIZE);
        template.loop_predicate = predicate;

        trace!(
            functions = template.functions.len(),
            temporaries = generation.next_tmp,
            "generated code"
        );

        Ok(template)
    }
}

fn join_lines(lines: &[String], size: usize) -> String {
    if lines.is_empty() {
        return String::new();
    }
    indent(&format!("{};", lines.join(";\n")), size)
}

fn glsl_type(ty: &Type) -> GlslResult<&'static str> {
    ty.glsl_name()
        .ok_or_else(|| CodeGenerationError::new(format!("{} type has no GLSL counterpart", ty)))
}

/// State of one `generate_code` run.
struct Generation<'a> {
    options: &'a GeneratorOptions,
    /// Builtin functions referenced so far, in first-use order.
    used: IndexMap<String, BuiltinDefinition>,
    next_tmp: usize,
}

impl<'a> Generation<'a> {
    fn new(options: &'a GeneratorOptions) -> Self {
        Generation {
            options,
            used: IndexMap::new(),
            next_tmp: 0,
        }
    }

    fn list(&mut self, list: &ExprList, lines: &mut Vec<String>) -> GlslResult<()> {
        for expr in &list.exprs {
            let code = self.expr(expr, lines)?;
            lines.push(code);
        }
        Ok(())
    }

    /// Code of `expr` as a GLSL expression. Temporaries it needs are pushed to `lines`.
    fn expr(&mut self, expr: &Expr, lines: &mut Vec<String>) -> GlslResult<String> {
        match &expr.kind {
            ExprKind::Id(definition) => self.id(definition),
            ExprKind::Bool(value) => Ok(value.to_string()),
            ExprKind::Real(value) => Ok(format!("{}({})", glsl_type(&expr.ty)?, value)),
            ExprKind::Imm(value) => Ok(format!("vec2(0.0, {})", value)),
            ExprKind::Assign {
                op,
                target,
                value,
                first,
            } => self.assign(*op, target, value, *first, lines),
            ExprKind::Cast(arg) => self.cast(&expr.ty, arg, lines),
            ExprKind::Unary { op, arg } => {
                let arg = self.expr(arg, lines)?;
                Ok(match op {
                    UnaryOp::Not => format!("!({})", arg),
                    UnaryOp::Pos => format!("abs({})", arg),
                    UnaryOp::Neg if arg.starts_with('-') => format!("-({})", arg),
                    UnaryOp::Neg => format!("-{}", arg),
                })
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs_code = self.expr(lhs, lines)?;
                let rhs_code = self.expr(rhs, lines)?;
                match self.arith(*op, &lhs.ty, &lhs_code, &rhs_code)? {
                    Some(code) => Ok(code),
                    None => Ok(format!("({} {} {})", lhs_code, op.glsl(), rhs_code)),
                }
            }
            ExprKind::Call { callee, args } => self.call(callee, args, lines),
        }
    }

    fn assign(
        &mut self,
        op: AssignOp,
        target: &Definition,
        value: &Expr,
        first: bool,
        lines: &mut Vec<String>,
    ) -> GlslResult<String> {
        let value = self.expr(value, lines)?;
        let var = self.var_name(target.id());

        if op == AssignOp::Init {
            return Ok(if first {
                format!("{} {} = {}", glsl_type(target.ty())?, var, value)
            } else {
                format!("{} = {}", var, value)
            });
        }

        let special = match op.binary() {
            Some(binary) => self.arith(binary, target.ty(), &var, &value)?,
            None => None,
        };

        Ok(match special {
            Some(code) => format!("({} = {})", var, code),
            None => format!("({} {} {})", var, op.as_str(), value),
        })
    }

    /// Arithmetic GLSL has no operator for: complex `*`, `/` and `^` go through
    /// the overload functions, real `^` through `pow`. `None` means the native
    /// infix form applies.
    fn arith(&mut self, op: BinaryOp, ty: &Type, lhs: &str, rhs: &str) -> GlslResult<Option<String>> {
        let overload = match (op, ty) {
            (BinaryOp::Mul, Type::Complex) => builtins::MUL_COMPLEX,
            (BinaryOp::Div, Type::Complex) => builtins::DIV_COMPLEX,
            (BinaryOp::Pow, Type::Complex) => builtins::POW_COMPLEX,
            (BinaryOp::Pow, Type::Float) => return Ok(Some(format!("pow({}, {})", lhs, rhs))),
            (BinaryOp::Pow, Type::Int) => {
                return Ok(Some(format!("int(pow(float({}), float({})))", lhs, rhs)))
            }
            _ => return Ok(None),
        };

        let name = self.overload(overload)?;
        Ok(Some(format!("{}({}, {})", name, lhs, rhs)))
    }

    fn overload(&mut self, id: &str) -> GlslResult<String> {
        let options = self.options;
        let definition = options
            .definitions
            .get(id)
            .ok_or_else(|| CodeGenerationError::new(format!("Missing {} function definition", id)))?;

        match definition {
            Definition::Builtin(def) if definition.is_function() => {
                self.use_function(def);
                Ok(def.name.clone())
            }
            _ => Err(CodeGenerationError::new(format!(
                "{} must be a built-in function",
                id
            ))),
        }
    }

    fn cast(&mut self, to: &Type, arg: &Expr, lines: &mut Vec<String>) -> GlslResult<String> {
        match to {
            Type::Function(_) => {
                return Err(CodeGenerationError::new(
                    "Casting to function types isn't supported",
                ))
            }
            Type::Unit => {
                return Err(CodeGenerationError::new(format!(
                    "Casting to {} type isn't supported",
                    to
                )))
            }
            _ => {}
        }

        let from = &arg.ty;

        if from.is_function() {
            if to.is_bool() {
                return Ok("true".to_string());
            }
            return Err(CodeGenerationError::new(format!(
                "Casting of function types to types other than {} type isn't supported",
                Type::Bool
            )));
        }

        if from.is_unit() {
            return Err(CodeGenerationError::new(format!(
                "Casting of {} type isn't supported",
                from
            )));
        }

        let code = self.expr(arg, lines)?;

        if from == to {
            return Ok(code);
        }

        if !from.is_complex() {
            return Ok(match to {
                Type::Bool => format!("bool({})", code),
                Type::Int => format!("int({})", code),
                Type::Float => format!("float({})", code),
                Type::Complex => format!("vec2({}, 0.0)", code),
                Type::Unit | Type::Function(_) => unreachable!("rejected above"),
            });
        }

        let tmp = self.tmp_var(code, &Type::Complex, lines)?;

        Ok(match to {
            Type::Bool => format!("({0}.x != 0.0 && {0}.y != 0.0)", tmp),
            Type::Int => format!("int({}.x)", tmp),
            Type::Float => format!("float({}.x)", tmp),
            Type::Complex | Type::Unit | Type::Function(_) => unreachable!("rejected above"),
        })
    }

    fn call(
        &mut self,
        callee: &Definition,
        args: &[Expr],
        lines: &mut Vec<String>,
    ) -> GlslResult<String> {
        let name = self.id(callee)?;

        let mut vars = Vec::with_capacity(args.len());
        for arg in args {
            if arg.ty.is_function() {
                return Err(CodeGenerationError::new(
                    "Function-type arguments aren't supported",
                ));
            }
            let code = self.expr(arg, lines)?;
            vars.push(self.tmp_var(code, &arg.ty, lines)?);
        }

        Ok(format!("{}({})", name, vars.join(", ")))
    }

    fn id(&mut self, definition: &Definition) -> GlslResult<String> {
        match definition {
            Definition::User(_) if definition.is_function() => Err(CodeGenerationError::new(
                "User-defined functions aren't supported",
            )),
            Definition::User(def) => Ok(self.var_name(&def.id)),
            Definition::Builtin(def) => {
                if definition.is_function() {
                    self.use_function(def);
                }
                Ok(def.name.clone())
            }
        }
    }

    fn use_function(&mut self, def: &BuiltinDefinition) {
        self.used
            .entry(def.id.clone())
            .or_insert_with(|| def.clone());
    }

    /// Declare `<type> _N = code` and return `_N`.
    fn tmp_var(&mut self, code: String, ty: &Type, lines: &mut Vec<String>) -> GlslResult<String> {
        let ty = glsl_type(ty)?;
        let name = self.var_name(&self.next_tmp.to_string());
        self.next_tmp += 1;
        lines.push(format!("{} {} = {}", ty, name, code));
        Ok(name)
    }

    fn var_name(&self, id: &str) -> String {
        format!("{}{}", self.options.var_prefix, id)
    }
}
