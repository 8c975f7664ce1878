//! AST visitor trait for traversing the syntax tree.
//!
//! Each `visit_*` method defaults to the matching `walk_*` function, which
//! visits the node's children. An implementation that overrides a method can
//! still call the `walk_*` function to continue into the children, which is
//! how scope-tracking visitors wrap a subtree.
//!
//! Identifiers are reported through three hooks depending on their role:
//! [`AstVisitor::visit_identifier_reference`] for names read in expressions,
//! [`AstVisitor::visit_type_reference_name`] for names used as types (type
//! references, heritage clauses) and [`AstVisitor::visit_type_query_name`]
//! for `typeof x` in type position. Declaration names, property names and
//! import/export specifiers are not references and are not reported.

use crate::node::*;

pub trait AstVisitor<'a> {
    fn visit_source_file(&mut self, node: &SourceFile<'a>) {
        walk_source_file(self, node)
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        walk_statement(self, stmt)
    }

    // -- Statements --

    fn visit_import_declaration(&mut self, _node: &ImportDeclaration<'a>) {}

    fn visit_export_declaration(&mut self, _node: &ExportDeclaration<'a>) {}

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration<'a>) {
        walk_variable_declaration(self, node)
    }

    fn visit_function_declaration(&mut self, node: &FunctionDeclaration<'a>) {
        walk_function_declaration(self, node)
    }

    fn visit_interface_declaration(&mut self, node: &InterfaceDeclaration<'a>) {
        walk_interface_declaration(self, node)
    }

    fn visit_type_alias_declaration(&mut self, node: &TypeAliasDeclaration<'a>) {
        walk_type_alias_declaration(self, node)
    }

    fn visit_enum_declaration(&mut self, node: &EnumDeclaration<'a>) {
        walk_enum_declaration(self, node)
    }

    fn visit_block(&mut self, node: &Block<'a>) {
        walk_block(self, node)
    }

    fn visit_unsupported_statement(&mut self, _node: &UnsupportedStatement<'a>) {}

    // -- Expressions --

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        walk_expression(self, expr)
    }

    fn visit_identifier_reference(&mut self, _node: &Identifier<'a>) {}

    fn visit_object_literal(&mut self, node: &ObjectLiteralExpression<'a>) {
        walk_object_literal(self, node)
    }

    fn visit_method_declaration(&mut self, node: &MethodDeclaration<'a>) {
        walk_method_declaration(self, node)
    }

    fn visit_accessor_declaration(&mut self, node: &AccessorDeclaration<'a>) {
        walk_accessor_declaration(self, node)
    }

    fn visit_function_expression(&mut self, node: &FunctionExpression<'a>) {
        walk_function_expression(self, node)
    }

    fn visit_arrow_function(&mut self, node: &ArrowFunction<'a>) {
        walk_arrow_function(self, node)
    }

    fn visit_property_name(&mut self, name: &PropertyName<'a>) {
        if let PropertyName::ComputedPropertyName(computed) = name {
            self.visit_expression(computed.expression);
        }
    }

    // -- Types --

    fn visit_type_node(&mut self, ty: &TypeNode<'a>) {
        walk_type_node(self, ty)
    }

    fn visit_type_reference_name(&mut self, _name: &EntityName<'a>) {}

    fn visit_type_query_name(&mut self, _name: &EntityName<'a>) {}

    fn visit_type_element(&mut self, elem: &TypeElement<'a>) {
        walk_type_element(self, elem)
    }

    fn visit_function_type(&mut self, node: &FunctionTypeNode<'a>) {
        walk_function_type(self, node)
    }

    fn visit_method_signature(&mut self, node: &MethodSignature<'a>) {
        walk_method_signature(self, node)
    }

    fn visit_signature_declaration(&mut self, node: &SignatureDeclaration<'a>) {
        walk_signature_declaration(self, node)
    }

    fn visit_mapped_type(&mut self, node: &MappedTypeNode<'a>) {
        walk_mapped_type(self, node)
    }

    fn visit_conditional_type(&mut self, node: &ConditionalTypeNode<'a>) {
        walk_conditional_type(self, node)
    }

    // -- Declarations --

    fn visit_type_parameter(&mut self, node: &TypeParameterDeclaration<'a>) {
        if let Some(constraint) = node.constraint {
            self.visit_type_node(constraint);
        }
        if let Some(default) = node.default {
            self.visit_type_node(default);
        }
    }

    fn visit_parameter(&mut self, node: &ParameterDeclaration<'a>) {
        self.visit_binding_name(&node.name);
        if let Some(ty) = node.type_annotation {
            self.visit_type_node(ty);
        }
        if let Some(init) = node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_binding_name(&mut self, name: &BindingName<'a>) {
        walk_binding_name(self, name)
    }

    fn visit_heritage_clause(&mut self, node: &HeritageClause<'a>) {
        for ty in node.types.iter() {
            self.visit_type_reference_name(&ty.expression);
            visit_type_arguments(self, ty.type_arguments);
        }
    }
}

// ============================================================================
// Walk functions
// ============================================================================

pub fn walk_source_file<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &SourceFile<'a>) {
    for stmt in node.statements.iter() {
        v.visit_statement(stmt);
    }
}

pub fn walk_statement<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, stmt: &Statement<'a>) {
    match stmt {
        Statement::ImportDeclaration(n) => v.visit_import_declaration(n),
        Statement::ExportDeclaration(n) => v.visit_export_declaration(n),
        Statement::ExportAssignment(n) => v.visit_expression(n.expression),
        Statement::InterfaceDeclaration(n) => v.visit_interface_declaration(n),
        Statement::TypeAliasDeclaration(n) => v.visit_type_alias_declaration(n),
        Statement::EnumDeclaration(n) => v.visit_enum_declaration(n),
        Statement::VariableStatement(n) => {
            for decl in n.declaration_list.declarations.iter() {
                v.visit_variable_declaration(decl);
            }
        }
        Statement::FunctionDeclaration(n) => v.visit_function_declaration(n),
        Statement::Block(n) => v.visit_block(n),
        Statement::EmptyStatement(_) => {}
        Statement::ExpressionStatement(n) => v.visit_expression(n.expression),
        Statement::IfStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.then_statement);
            if let Some(else_stmt) = n.else_statement {
                v.visit_statement(else_stmt);
            }
        }
        Statement::ReturnStatement(n) => {
            if let Some(expr) = n.expression {
                v.visit_expression(expr);
            }
        }
        Statement::ThrowStatement(n) => v.visit_expression(n.expression),
        Statement::SwitchStatement(n) => {
            v.visit_expression(n.expression);
            for clause in n.clauses.iter() {
                if let Some(expr) = clause.expression {
                    v.visit_expression(expr);
                }
                for stmt in clause.statements.iter() {
                    v.visit_statement(stmt);
                }
            }
        }
        Statement::BreakStatement(_) | Statement::ContinueStatement(_) => {}
        Statement::UnsupportedStatement(n) => v.visit_unsupported_statement(n),
    }
}

pub fn walk_variable_declaration<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &VariableDeclaration<'a>) {
    v.visit_binding_name(&node.name);
    if let Some(ty) = node.type_annotation {
        v.visit_type_node(ty);
    }
    if let Some(init) = node.initializer {
        v.visit_expression(init);
    }
}

fn visit_signature_parts<'a, V: AstVisitor<'a> + ?Sized>(
    v: &mut V,
    type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    parameters: NodeList<'a, ParameterDeclaration<'a>>,
    return_type: OptionalNode<'a, TypeNode<'a>>,
) {
    for tp in type_parameters.unwrap_or(&[]).iter() {
        v.visit_type_parameter(tp);
    }
    for param in parameters.iter() {
        v.visit_parameter(param);
    }
    if let Some(ret) = return_type {
        v.visit_type_node(ret);
    }
}

fn visit_type_arguments<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, args: Option<NodeList<'a, TypeNode<'a>>>) {
    for arg in args.unwrap_or(&[]).iter() {
        v.visit_type_node(arg);
    }
}

pub fn walk_function_declaration<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &FunctionDeclaration<'a>) {
    visit_signature_parts(v, node.type_parameters, node.parameters, node.return_type);
    if let Some(body) = node.body {
        v.visit_block(body);
    }
}

pub fn walk_interface_declaration<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &InterfaceDeclaration<'a>) {
    for tp in node.type_parameters.unwrap_or(&[]).iter() {
        v.visit_type_parameter(tp);
    }
    for clause in node.heritage_clauses.unwrap_or(&[]).iter() {
        v.visit_heritage_clause(clause);
    }
    for member in node.members.iter() {
        v.visit_type_element(member);
    }
}

pub fn walk_type_alias_declaration<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &TypeAliasDeclaration<'a>) {
    for tp in node.type_parameters.unwrap_or(&[]).iter() {
        v.visit_type_parameter(tp);
    }
    v.visit_type_node(node.type_node);
}

pub fn walk_enum_declaration<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &EnumDeclaration<'a>) {
    for member in node.members.iter() {
        v.visit_property_name(&member.name);
        if let Some(init) = member.initializer {
            v.visit_expression(init);
        }
    }
}

pub fn walk_block<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &Block<'a>) {
    for stmt in node.statements.iter() {
        v.visit_statement(stmt);
    }
}

pub fn walk_expression<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, expr: &Expression<'a>) {
    match expr {
        Expression::Identifier(id) => v.visit_identifier_reference(id),
        Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegularExpressionLiteral(_)
        | Expression::NoSubstitutionTemplateLiteral(_)
        | Expression::Keyword(_)
        | Expression::Omitted(_)
        | Expression::Missing(_) => {}
        Expression::TemplateExpression(n) => {
            for span in n.template_spans.iter() {
                v.visit_expression(span.expression);
            }
        }
        Expression::ArrayLiteral(n) => {
            for element in n.elements.iter() {
                v.visit_expression(element);
            }
        }
        Expression::ObjectLiteral(n) => v.visit_object_literal(n),
        Expression::PropertyAccess(n) => v.visit_expression(n.expression),
        Expression::ElementAccess(n) => {
            v.visit_expression(n.expression);
            v.visit_expression(n.argument_expression);
        }
        Expression::Call(n) => {
            v.visit_expression(n.expression);
            visit_type_arguments(v, n.type_arguments);
            for arg in n.arguments.iter() {
                v.visit_expression(arg);
            }
        }
        Expression::New(n) => {
            v.visit_expression(n.expression);
            visit_type_arguments(v, n.type_arguments);
            for arg in n.arguments.unwrap_or(&[]).iter() {
                v.visit_expression(arg);
            }
        }
        Expression::Parenthesized(n) => v.visit_expression(n.expression),
        Expression::Function(n) => v.visit_function_expression(n),
        Expression::ArrowFunction(n) => v.visit_arrow_function(n),
        Expression::PrefixUnary(n) => v.visit_expression(n.operand),
        Expression::PostfixUnary(n) => v.visit_expression(n.operand),
        Expression::Binary(n) => {
            v.visit_expression(n.left);
            v.visit_expression(n.right);
        }
        Expression::Conditional(n) => {
            v.visit_expression(n.condition);
            v.visit_expression(n.when_true);
            v.visit_expression(n.when_false);
        }
        Expression::Spread(n) => v.visit_expression(n.expression),
        Expression::As(n) | Expression::Satisfies(n) => {
            v.visit_expression(n.expression);
            v.visit_type_node(n.type_node);
        }
        Expression::TypeAssertion(n) => {
            v.visit_type_node(n.type_node);
            v.visit_expression(n.expression);
        }
        Expression::NonNull(n) => v.visit_expression(n.expression),
    }
}

pub fn walk_object_literal<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &ObjectLiteralExpression<'a>) {
    for member in node.properties.iter() {
        match member {
            ObjectLiteralElement::PropertyAssignment(n) => {
                v.visit_property_name(&n.name);
                v.visit_expression(n.initializer);
            }
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => v.visit_identifier_reference(&n.name),
            ObjectLiteralElement::SpreadAssignment(n) => v.visit_expression(n.expression),
            ObjectLiteralElement::MethodDeclaration(n) => v.visit_method_declaration(n),
            ObjectLiteralElement::GetAccessor(n) | ObjectLiteralElement::SetAccessor(n) => {
                v.visit_accessor_declaration(n)
            }
        }
    }
}

pub fn walk_method_declaration<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &MethodDeclaration<'a>) {
    v.visit_property_name(&node.name);
    visit_signature_parts(v, node.type_parameters, node.parameters, node.return_type);
    if let Some(body) = node.body {
        v.visit_block(body);
    }
}

pub fn walk_accessor_declaration<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &AccessorDeclaration<'a>) {
    v.visit_property_name(&node.name);
    visit_signature_parts(v, None, node.parameters, node.return_type);
    if let Some(body) = node.body {
        v.visit_block(body);
    }
}

pub fn walk_function_expression<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &FunctionExpression<'a>) {
    visit_signature_parts(v, node.type_parameters, node.parameters, node.return_type);
    v.visit_block(node.body);
}

pub fn walk_arrow_function<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &ArrowFunction<'a>) {
    visit_signature_parts(v, node.type_parameters, node.parameters, node.return_type);
    match node.body {
        ConciseBody::Block(block) => v.visit_block(block),
        ConciseBody::Expression(expr) => v.visit_expression(expr),
    }
}

pub fn walk_binding_name<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, name: &BindingName<'a>) {
    match name {
        BindingName::Identifier(_) => {}
        BindingName::ObjectBindingPattern(pattern) => {
            for element in pattern.elements.iter() {
                walk_binding_element(v, element);
            }
        }
        BindingName::ArrayBindingPattern(pattern) => {
            for element in pattern.elements.iter().flatten() {
                walk_binding_element(v, element);
            }
        }
    }
}

fn walk_binding_element<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, element: &BindingElement<'a>) {
    if let Some(ref property_name) = element.property_name {
        v.visit_property_name(property_name);
    }
    v.visit_binding_name(&element.name);
    if let Some(init) = element.initializer {
        v.visit_expression(init);
    }
}

pub fn walk_type_node<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, ty: &TypeNode<'a>) {
    match ty {
        TypeNode::KeywordType(_) => {}
        TypeNode::TypeReference(n) => {
            v.visit_type_reference_name(&n.type_name);
            visit_type_arguments(v, n.type_arguments);
        }
        TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => v.visit_function_type(n),
        TypeNode::TypeQuery(n) => {
            v.visit_type_query_name(&n.expr_name);
            visit_type_arguments(v, n.type_arguments);
        }
        TypeNode::TypeLiteral(n) => {
            for member in n.members.iter() {
                v.visit_type_element(member);
            }
        }
        TypeNode::ArrayType(n) => v.visit_type_node(n.element_type),
        TypeNode::TupleType(n) => {
            for element in n.elements.iter() {
                v.visit_type_node(element);
            }
        }
        TypeNode::NamedTupleMember(n) => v.visit_type_node(n.type_node),
        TypeNode::OptionalType(n) | TypeNode::RestType(n) | TypeNode::ParenthesizedType(n) => {
            v.visit_type_node(n.type_node)
        }
        TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => {
            for member in n.types.iter() {
                v.visit_type_node(member);
            }
        }
        TypeNode::ConditionalType(n) => v.visit_conditional_type(n),
        TypeNode::InferType(n) => v.visit_type_parameter(n.type_parameter),
        TypeNode::TypeOperator(n) => v.visit_type_node(n.type_node),
        TypeNode::IndexedAccessType(n) => {
            v.visit_type_node(n.object_type);
            v.visit_type_node(n.index_type);
        }
        TypeNode::MappedType(n) => v.visit_mapped_type(n),
        TypeNode::LiteralType(n) => v.visit_expression(n.literal),
        TypeNode::TypePredicate(n) => {
            if let Some(ty) = n.type_node {
                v.visit_type_node(ty);
            }
        }
    }
}

pub fn walk_type_element<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, elem: &TypeElement<'a>) {
    match elem {
        TypeElement::PropertySignature(n) => {
            v.visit_property_name(&n.name);
            if let Some(ty) = n.type_annotation {
                v.visit_type_node(ty);
            }
        }
        TypeElement::MethodSignature(n) => v.visit_method_signature(n),
        TypeElement::CallSignature(n) | TypeElement::ConstructSignature(n) => v.visit_signature_declaration(n),
        TypeElement::IndexSignature(n) => {
            for param in n.parameters.iter() {
                v.visit_parameter(param);
            }
            if let Some(ty) = n.type_annotation {
                v.visit_type_node(ty);
            }
        }
    }
}

pub fn walk_function_type<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &FunctionTypeNode<'a>) {
    visit_signature_parts(v, node.type_parameters, node.parameters, Some(node.return_type));
}

pub fn walk_method_signature<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &MethodSignature<'a>) {
    v.visit_property_name(&node.name);
    visit_signature_parts(v, node.type_parameters, node.parameters, node.return_type);
}

pub fn walk_signature_declaration<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &SignatureDeclaration<'a>) {
    visit_signature_parts(v, node.type_parameters, node.parameters, node.return_type);
}

pub fn walk_mapped_type<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &MappedTypeNode<'a>) {
    v.visit_type_parameter(node.type_parameter);
    if let Some(name_type) = node.name_type {
        v.visit_type_node(name_type);
    }
    if let Some(ty) = node.type_node {
        v.visit_type_node(ty);
    }
}

pub fn walk_conditional_type<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &ConditionalTypeNode<'a>) {
    v.visit_type_node(node.check_type);
    v.visit_type_node(node.extends_type);
    v.visit_type_node(node.true_type);
    v.visit_type_node(node.false_type);
}
