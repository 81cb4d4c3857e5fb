//! Per-run generation context.

use beanforge_core::{
    BeanDef, CodeStyle, EnumDef, GenerationConfig, NameRole, Schema, TypeMapper,
};

/// Everything a visitor needs besides the node it is looking at.
///
/// Built once per run and shared read-only by every generation unit.
#[derive(Debug, Clone)]
pub struct GenContext<'a> {
    pub schema: &'a Schema,
    pub style: CodeStyle,
    /// Generation target matched against type mappers (e.g. `client`)
    pub target: String,
    /// Code target name (e.g. `angelscript-json`)
    pub code_target: &'static str,
}

impl<'a> GenContext<'a> {
    pub fn new(
        schema: &'a Schema,
        style: CodeStyle,
        target: impl Into<String>,
        code_target: &'static str,
    ) -> Self {
        Self {
            schema,
            style,
            target: target.into(),
            code_target,
        }
    }

    /// Context for `code_target` with `config`'s target and casing overrides.
    pub fn from_config(
        schema: &'a Schema,
        base_style: CodeStyle,
        code_target: &'static str,
        config: &GenerationConfig,
    ) -> Self {
        Self::new(
            schema,
            config.code_style.apply(base_style),
            config.target.clone(),
            code_target,
        )
    }

    pub fn format(&self, raw: &str, role: NameRole) -> String {
        self.style.format_identifier(raw, role)
    }

    pub fn bean_mapper<'b>(&self, bean: &'b BeanDef) -> Option<&'b TypeMapper> {
        bean.type_mapper(&self.target, self.code_target)
    }

    pub fn enum_mapper<'b>(&self, def: &'b EnumDef) -> Option<&'b TypeMapper> {
        def.type_mapper(&self.target, self.code_target)
    }

    /// Native type a mapped bean stands for. Such beans are never generated.
    pub fn native_bean_name<'b>(&self, bean: &'b BeanDef) -> Option<&'b str> {
        self.bean_mapper(bean).and_then(TypeMapper::type_name)
    }

    pub fn native_enum_name<'b>(&self, def: &'b EnumDef) -> Option<&'b str> {
        self.enum_mapper(def).and_then(TypeMapper::type_name)
    }
}
