//! Context variables a Tera template reads.
//!
//! Walks the parsed template instead of its text, so `{% raw %}` blocks and
//! comments are skipped and every variable inside an expression is seen.
//! A variable is collected only when reading it unbound would fail the
//! render. That leaves out names the template binds itself (loop variables,
//! `set` targets) and reads it guards itself:
//!
//! - `{{ x | default(value=...) }}` with `default` as the first filter
//! - `x is defined`, `x is undefined`
//! - a bare `x` or `not x` used as a truth value

use std::collections::BTreeSet;

use tera::Template;
use tera::ast::{Expr, ExprVal, FunctionCall, LogicOperator, Node, Test};

/// Dumps the whole context, always available.
const CONTEXT_DUMP: &str = "__tera_context";

/// Parse `template` and collect the variables it requires.
pub(super) fn required_variables(template: &str) -> tera::Result<BTreeSet<String>> {
    let parsed = Template::new("one_off", None, template)?;
    let mut collector = Collector::new();
    collector.nodes(&parsed.ast);
    Ok(collector.names)
}

struct Collector {
    names: BTreeSet<String>,
    /// Names bound by the template itself. The first scope is the top level.
    scopes: Vec<Vec<String>>,
}

impl Collector {
    fn new() -> Self {
        Self {
            names: BTreeSet::new(),
            scopes: vec![Vec::new()],
        }
    }

    fn nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::VariableBlock(_, expr) => self.expr(expr),
                Node::Set(_, set) => {
                    self.expr(&set.value);
                    let scope = if set.global {
                        self.scopes.first_mut()
                    } else {
                        self.scopes.last_mut()
                    };
                    if let Some(scope) = scope {
                        scope.push(set.key.clone());
                    }
                }
                Node::FilterSection(_, section, _) => {
                    self.call_args(&section.filter);
                    self.nodes(&section.body);
                }
                Node::Block(_, block, _) => self.nodes(&block.body),
                Node::Forloop(_, forloop, _) => {
                    self.expr(&forloop.container);

                    let mut bound = vec!["loop".to_string(), forloop.value.clone()];
                    bound.extend(forloop.key.clone());
                    self.scopes.push(bound);
                    self.nodes(&forloop.body);
                    self.scopes.pop();

                    if let Some(empty) = &forloop.empty_body {
                        self.nodes(empty);
                    }
                }
                Node::If(if_node, _) => {
                    for (_, condition, body) in &if_node.conditions {
                        self.condition(condition);
                        self.nodes(body);
                    }
                    if let Some((_, body)) = &if_node.otherwise {
                        self.nodes(body);
                    }
                }
                // Text, raw blocks and comments read nothing. Macro bodies only
                // see their own arguments.
                _ => {}
            }
        }
    }

    /// An expression whose value is rendered or passed on.
    fn expr(&mut self, expr: &Expr) {
        if let ExprVal::Ident(_) = &expr.val {
            if expr.negated {
                return;
            }
            if !expr.has_default_filter() {
                self.val(&expr.val);
            }
        } else {
            self.val(&expr.val);
        }

        for filter in &expr.filters {
            self.call_args(filter);
        }
    }

    /// An expression evaluated for truth, where an unbound name is false.
    fn condition(&mut self, expr: &Expr) {
        match &expr.val {
            ExprVal::Ident(_) => {}
            ExprVal::Logic(logic)
                if matches!(logic.operator, LogicOperator::And | LogicOperator::Or) =>
            {
                self.condition(&logic.lhs);
                self.condition(&logic.rhs);
            }
            _ => self.expr(expr),
        }
    }

    fn val(&mut self, val: &ExprVal) {
        match val {
            ExprVal::Ident(path) => self.path(path),
            ExprVal::Math(math) => {
                self.expr(&math.lhs);
                self.expr(&math.rhs);
            }
            ExprVal::Logic(logic) => match logic.operator {
                LogicOperator::And | LogicOperator::Or => {
                    self.condition(&logic.lhs);
                    self.condition(&logic.rhs);
                }
                _ => {
                    self.expr(&logic.lhs);
                    self.expr(&logic.rhs);
                }
            },
            ExprVal::Test(test) => self.test(test),
            ExprVal::MacroCall(call) => {
                for arg in call.args.values() {
                    self.expr(arg);
                }
            }
            ExprVal::FunctionCall(call) => self.call_args(call),
            ExprVal::Array(items) => {
                for item in items {
                    self.expr(item);
                }
            }
            ExprVal::StringConcat(concat) => {
                for value in &concat.values {
                    self.val(value);
                }
            }
            ExprVal::In(membership) => {
                self.expr(&membership.lhs);
                self.expr(&membership.rhs);
            }
            _ => {}
        }
    }

    fn test(&mut self, test: &Test) {
        for arg in &test.args {
            self.expr(arg);
        }
        if !matches!(test.name.as_str(), "defined" | "undefined") {
            self.path(&test.ident);
        }
    }

    fn call_args(&mut self, call: &FunctionCall) {
        for arg in call.args.values() {
            self.expr(arg);
        }
    }

    /// `a`, `a.b`, `a[0]`, `a[b]`: the root name plus any index variables.
    fn path(&mut self, path: &str) {
        let root = path.split(['.', '[']).next().unwrap_or(path).trim();
        if !root.is_empty() && root != CONTEXT_DUMP && !self.is_bound(root) {
            self.names.insert(root.to_string());
        }
        for index in index_variables(path) {
            self.path(index);
        }
    }

    fn is_bound(&self, name: &str) -> bool {
        self.scopes.iter().flatten().any(|bound| bound == name)
    }
}

/// Contents of top-level `[...]` groups that are neither quoted nor numeric.
fn index_variables(path: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in path.char_indices() {
        match c {
            '[' => {
                if depth == 0 {
                    start = i + 1;
                }
                depth += 1;
            }
            ']' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let inner = path[start..i].trim();
                    if !inner.starts_with(['"', '\'']) && inner.parse::<usize>().is_err() {
                        found.push(inner);
                    }
                }
            }
            _ => {}
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(template: &str) -> Vec<String> {
        required_variables(template).unwrap().into_iter().collect()
    }

    #[test]
    fn every_variable_of_an_expression() {
        assert_eq!(names("[{{ real ~ ghost }}]"), ["ghost", "real"]);
        assert_eq!(names("{{ a + b }} {{ c | replace(from=d, to=\"x\") }}"), ["a", "b", "c", "d"]);
    }

    #[test]
    fn paths_reduce_to_their_root() {
        assert_eq!(names("{{ a.b }} {{ c[0] }} {{ d[e] }} {{ f[\"g\"] }}"), ["a", "c", "d", "e", "f"]);
    }

    #[test]
    fn default_filter_guards_the_variable() {
        assert!(names("{{ ghost | default(value=\"fallback\") }}").is_empty());
        assert_eq!(names("{{ ghost | default(value=other) }}"), ["other"]);
        assert_eq!(names("{{ ghost | upper | default(value=\"x\") }}"), ["ghost"]);
    }

    #[test]
    fn defined_tests_and_truth_values_are_guarded() {
        let template = "{% if ghost is defined %}{{ ghost }}{% endif %}\
                        {% if not other or third %}x{% endif %}";
        // the body still reads `ghost`
        assert_eq!(names(template), ["ghost"]);
        assert!(names("{% if a and b is undefined %}x{% endif %}").is_empty());
    }

    #[test]
    fn comparisons_require_their_operands() {
        assert_eq!(names("{% if a == \"x\" %}{% endif %}"), ["a"]);
    }

    #[test]
    fn loop_variables_are_bound_inside_the_loop() {
        let template = "{% for item in items %}{{ loop.index }}{{ item }}{% endfor %}{{ item }}";
        assert_eq!(names(template), ["item", "items"]);
        assert_eq!(names("{% for k, v in map %}{{ k }}{{ v }}{% endfor %}"), ["map"]);
    }

    #[test]
    fn set_binds_from_that_point_on() {
        assert_eq!(names("{{ x }}{% set x = y %}{{ x }}"), ["x", "y"]);
        assert!(names("{% set x = \"1\" %}{{ x }}").is_empty());
    }

    #[test]
    fn raw_blocks_and_comments_are_skipped() {
        assert!(names("{% raw %}{{ x }}{% endraw %}{# {{ y }} #}").is_empty());
    }

    #[test]
    fn function_arguments_are_read() {
        assert_eq!(names("{% for i in range(end=n) %}{{ i }}{% endfor %}"), ["n"]);
    }

    #[test]
    fn context_dump_is_always_available() {
        assert!(names("{{ __tera_context }}").is_empty());
    }

    #[test]
    fn syntax_error_is_reported() {
        assert!(required_variables("{% if %}").is_err());
    }
}
