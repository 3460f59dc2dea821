use serde::Serialize;

/// The type of a placeholder, inferred from its format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    String,
    Int,
    Float,
}

impl VarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Int => "int",
            VarType::Float => "float",
        }
    }
}

impl std::fmt::Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A variable referenced by a placeholder in a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Var {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VarType,
}

impl Var {
    pub fn new(name: impl Into<String>, var_type: VarType) -> Self {
        Var {
            name: name.into(),
            var_type,
        }
    }
}

/// A single parsed message.
///
/// `text` holds the message with every `%(name)spec` placeholder rewritten to
/// its positional form (`%spec`), and `vars` lists the placeholders in order of
/// appearance. A variable used twice appears twice, so `vars[i]` always belongs
/// to the i-th format token of `text`.
///
/// `format` is `text` with every literal `%` doubled, ready for printf-style
/// formatting with `vars` as arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Message {
    pub text: String,
    #[serde(skip)]
    pub format: String,
    pub vars: Vec<Var>,
}

impl Message {
    /// Variables deduplicated by name, in order of first occurrence.
    pub fn unique_vars(&self) -> Vec<&Var> {
        let mut vars: Vec<&Var> = Vec::new();
        for var in &self.vars {
            if !vars.iter().any(|u| u.name == var.name) {
                vars.push(var);
            }
        }
        vars
    }

    pub fn has_type(&self, var_type: VarType) -> bool {
        self.vars.iter().any(|v| v.var_type == var_type)
    }

    /// First variable with the given name.
    pub fn var(&self, name: &str) -> Option<&Var> {
        self.vars.iter().find(|v| v.name == name)
    }

    pub fn has_vars(&self) -> bool {
        !self.vars.is_empty()
    }
}
