// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Method nodes and typed argument marshalling.
//!
//! A [`MethodState`] validates the argument count and forwards to its
//! handler. [`TypedMethodState`] layers a [`MethodArguments`] pair on top so
//! handlers receive decoded records instead of raw variants.

use super::{impl_instance_node, BaseNode, HasChildren, InstanceNode, NodeClass, SystemContext};
use crate::error::{Error, Result};
use crate::model::Argument;
use crate::types::{NamespaceTable, NodeId, QualifiedName, Variant, VariantValue};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Call-time view handed to method handlers.
#[derive(Debug, Clone, Copy)]
pub struct MethodContext<'a> {
    pub system: &'a SystemContext,
    /// Object the method was called on.
    pub object_id: &'a NodeId,
    pub method_id: &'a NodeId,
}

pub type MethodHandler =
    Arc<dyn Fn(&MethodContext<'_>, &[Variant]) -> Result<Vec<Variant>> + Send + Sync>;

/// Method node with declared arguments and an optional handler.
#[derive(Clone)]
pub struct MethodState {
    base: BaseNode,
    pub executable: bool,
    pub input_arguments: Vec<Argument>,
    pub output_arguments: Vec<Argument>,
    handler: Option<MethodHandler>,
}

impl Default for MethodState {
    fn default() -> Self {
        Self::new(BaseNode::default())
    }
}

impl MethodState {
    pub fn new(base: BaseNode) -> Self {
        Self {
            base,
            executable: true,
            input_arguments: Vec::new(),
            output_arguments: Vec::new(),
            handler: None,
        }
    }

    pub fn base(&self) -> &BaseNode {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut BaseNode {
        &mut self.base
    }

    pub fn set_handler<F>(&mut self, handler: F)
    where
        F: Fn(&MethodContext<'_>, &[Variant]) -> Result<Vec<Variant>> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
    }

    pub fn clear_handler(&mut self) {
        self.handler = None;
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Invoke the handler on behalf of `object_id`.
    pub fn call(
        &self,
        context: &SystemContext,
        object_id: &NodeId,
        inputs: &[Variant],
    ) -> Result<Vec<Variant>> {
        let name = &self.base.browse_name.name;
        if !self.executable {
            return Err(Error::InvalidState(format!("method '{name}' is not executable")));
        }
        if inputs.len() != self.input_arguments.len() {
            return Err(Error::BadArguments(format!(
                "method '{name}' expects {} input arguments, got {}",
                self.input_arguments.len(),
                inputs.len()
            )));
        }
        let Some(handler) = &self.handler else {
            return Err(Error::MethodNotImplemented(name.clone()));
        };

        log::debug!("[nodes] call {} on {}", name, object_id);
        let call = MethodContext {
            system: context,
            object_id,
            method_id: &self.base.node_id,
        };
        let outputs = handler(&call, inputs)?;
        if outputs.len() != self.output_arguments.len() {
            return Err(Error::InvalidState(format!(
                "method '{name}' returned {} outputs, declared {}",
                outputs.len(),
                self.output_arguments.len()
            )));
        }
        Ok(outputs)
    }
}

impl fmt::Debug for MethodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodState")
            .field("base", &self.base)
            .field("executable", &self.executable)
            .field("input_arguments", &self.input_arguments)
            .field("output_arguments", &self.output_arguments)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

impl_instance_node!(MethodState, NodeClass::Method);

impl HasChildren for MethodState {
    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>) {
        self.base.get_children(children);
    }

    fn find_child(
        &mut self,
        _context: &SystemContext,
        browse_name: &QualifiedName,
        _create_or_replace: bool,
    ) -> Option<&mut dyn InstanceNode> {
        self.base.find_child(browse_name)
    }
}

// ============================================================================
// Typed arguments
// ============================================================================

/// A record marshalled as a method's argument list.
pub trait MethodArguments: Sized + Send + Sync + 'static {
    /// Declared arguments, with data types resolved in `namespaces`.
    fn arguments(namespaces: &NamespaceTable) -> Vec<Argument>;
    fn to_variants(&self) -> Vec<Variant>;
    fn from_variants(values: &[Variant]) -> Result<Self>;
}

impl MethodArguments for () {
    fn arguments(_namespaces: &NamespaceTable) -> Vec<Argument> {
        Vec::new()
    }

    fn to_variants(&self) -> Vec<Variant> {
        Vec::new()
    }

    fn from_variants(_values: &[Variant]) -> Result<Self> {
        Ok(())
    }
}

/// Argument `index` as `T`.
pub fn argument_at<T: VariantValue>(values: &[Variant], index: usize, name: &str) -> Result<T> {
    let value = values
        .get(index)
        .ok_or_else(|| Error::BadArguments(format!("argument {name} missing")))?;
    T::from_variant(value).ok_or_else(|| {
        Error::BadArguments(format!(
            "argument {name} has type {}",
            value.builtin_type()
        ))
    })
}

/// [`MethodState`] whose handler works on typed inputs and outputs.
pub struct TypedMethodState<I, O> {
    method: MethodState,
    _arguments: PhantomData<fn(I) -> O>,
}

impl<I, O> Clone for TypedMethodState<I, O> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            _arguments: PhantomData,
        }
    }
}

impl<I, O> fmt::Debug for TypedMethodState<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.method.fmt(f)
    }
}

impl<I: MethodArguments, O: MethodArguments> TypedMethodState<I, O> {
    /// Method with arguments declared from `I` and `O`.
    pub fn new(context: &SystemContext, base: BaseNode) -> Self {
        let namespaces = context.namespaces();
        let mut method = MethodState::new(base);
        method.input_arguments = I::arguments(&namespaces);
        method.output_arguments = O::arguments(&namespaces);
        Self {
            method,
            _arguments: PhantomData,
        }
    }

    pub fn method(&self) -> &MethodState {
        &self.method
    }

    pub fn method_mut(&mut self) -> &mut MethodState {
        &mut self.method
    }

    pub fn set_handler<F>(&mut self, handler: F)
    where
        F: Fn(&MethodContext<'_>, I) -> Result<O> + Send + Sync + 'static,
    {
        self.method.set_handler(move |context, inputs| {
            let inputs = I::from_variants(inputs)?;
            Ok(handler(context, inputs)?.to_variants())
        });
    }

    /// Marshal `inputs`, call, and decode the outputs.
    pub fn call(&self, context: &SystemContext, object_id: &NodeId, inputs: &I) -> Result<O> {
        let outputs = self.method.call(context, object_id, &inputs.to_variants())?;
        O::from_variants(&outputs)
    }
}

impl<I: MethodArguments, O: MethodArguments> InstanceNode for TypedMethodState<I, O> {
    fn base(&self) -> &BaseNode {
        self.method.base()
    }

    fn base_mut(&mut self) -> &mut BaseNode {
        self.method.base_mut()
    }

    fn node_class(&self) -> NodeClass {
        NodeClass::Method
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl<I: MethodArguments, O: MethodArguments> HasChildren for TypedMethodState<I, O> {
    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>) {
        self.method.get_children(children);
    }

    fn find_child(
        &mut self,
        context: &SystemContext,
        browse_name: &QualifiedName,
        create_or_replace: bool,
    ) -> Option<&mut dyn InstanceNode> {
        self.method.find_child(context, browse_name, create_or_replace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuiltinType;

    fn echo_method() -> MethodState {
        let mut method = MethodState::new(BaseNode::new(QualifiedName::new(2, "Echo")));
        method.input_arguments = vec![Argument::scalar("Value", BuiltinType::Int32.data_type_id())];
        method.output_arguments = vec![Argument::scalar("Value", BuiltinType::Int32.data_type_id())];
        method
    }

    #[test]
    fn test_call_without_handler() {
        let context = SystemContext::new();
        let method = echo_method();
        let err = method
            .call(&context, &NodeId::numeric(2, 1), &[Variant::Int32(1)])
            .expect_err("no handler");
        assert!(matches!(err, Error::MethodNotImplemented(name) if name == "Echo"));
    }

    #[test]
    fn test_call_checks_input_count() {
        let context = SystemContext::new();
        let mut method = echo_method();
        method.set_handler(|_, inputs| Ok(inputs.to_vec()));
        assert!(matches!(
            method.call(&context, &NodeId::NULL, &[]),
            Err(Error::BadArguments(_))
        ));
        assert_eq!(
            method
                .call(&context, &NodeId::NULL, &[Variant::Int32(7)])
                .expect("echo"),
            vec![Variant::Int32(7)]
        );
    }

    #[test]
    fn test_not_executable() {
        let context = SystemContext::new();
        let mut method = echo_method();
        method.set_handler(|_, inputs| Ok(inputs.to_vec()));
        method.executable = false;
        assert!(matches!(
            method.call(&context, &NodeId::NULL, &[Variant::Int32(7)]),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_handler_sees_call_context() {
        let context = SystemContext::new();
        let mut method = echo_method();
        method.base_mut().node_id = NodeId::numeric(2, 77);
        method.set_handler(|call, _| {
            assert_eq!(call.method_id, &NodeId::numeric(2, 77));
            Ok(vec![Variant::Int32(call.object_id.as_numeric().unwrap_or(0) as i32)])
        });
        let outputs = method
            .call(&context, &NodeId::numeric(2, 5), &[Variant::Int32(0)])
            .expect("call");
        assert_eq!(outputs, vec![Variant::Int32(5)]);
    }

    #[test]
    fn test_argument_at_reports_type() {
        let values = [Variant::Byte(4)];
        assert_eq!(argument_at::<u8>(&values, 0, "Address").expect("byte"), 4);
        assert!(matches!(
            argument_at::<String>(&values, 0, "PDTag"),
            Err(Error::BadArguments(_))
        ));
        assert!(argument_at::<u8>(&values, 1, "NewAddress").is_err());
    }
}
