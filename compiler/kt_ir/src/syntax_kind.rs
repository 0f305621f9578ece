//! Node kinds of the concrete syntax tree.

use std::fmt;

/// Kind of an interior tree node.
///
/// Leaves are tokens and carry a [`TokenKind`](crate::TokenKind);
/// every other node carries one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // File structure
    File,
    Script,
    FileAnnotationList,
    PackageDirective,
    ImportList,
    ImportDirective,
    ImportAlias,

    // Declarations
    Class,
    ObjectDeclaration,
    Fun,
    Property,
    PropertyAccessor,
    PropertyDelegate,
    DestructuringDeclaration,
    DestructuringDeclarationEntry,
    TypeAlias,
    ClassBody,
    ClassInitializer,
    PrimaryConstructor,
    SecondaryConstructor,
    ConstructorDelegationCall,
    ConstructorDelegationReference,
    EnumEntry,
    InitializerList,
    SuperTypeList,
    SuperTypeEntry,
    SuperTypeCallEntry,
    DelegatedSuperTypeEntry,
    ConstructorCallee,
    TypeParameterList,
    TypeParameter,
    TypeConstraintList,
    TypeConstraint,
    ValueParameterList,
    ValueParameter,

    // Modifiers and annotations
    ModifierList,
    Annotation,
    AnnotationEntry,
    AnnotationTarget,

    // Types
    TypeReference,
    UserType,
    NullableType,
    FunctionType,
    FunctionTypeReceiver,
    DynamicType,
    TypeArgumentList,
    TypeProjection,

    // Control structures
    Block,
    Body,
    Condition,
    Then,
    Else,
    LoopRange,
    If,
    When,
    WhenEntry,
    WhenConditionExpression,
    WhenConditionInRange,
    WhenConditionIsPattern,
    For,
    While,
    DoWhile,
    Try,
    Catch,
    Finally,
    Break,
    Continue,
    Return,
    Throw,
    LabelQualifier,
    Label,

    // Expressions
    LabeledExpression,
    AnnotatedExpression,
    Parenthesized,
    BinaryExpression,
    BinaryWithType,
    IsExpression,
    PrefixExpression,
    PostfixExpression,
    OperationReference,
    CallExpression,
    ValueArgumentList,
    ValueArgument,
    ValueArgumentName,
    LambdaArgument,
    ArrayAccessExpression,
    Indices,
    DotQualifiedExpression,
    SafeAccessExpression,
    CallableReferenceExpression,
    ClassLiteralExpression,
    ReferenceExpression,
    ThisExpression,
    SuperExpression,
    ObjectLiteral,
    LambdaExpression,
    FunctionLiteral,

    // Literals and string templates
    StringTemplate,
    LiteralStringTemplateEntry,
    EscapeStringTemplateEntry,
    ShortStringTemplateEntry,
    LongStringTemplateEntry,
    BooleanConstant,
    IntegerConstant,
    FloatConstant,
    CharacterConstant,
    Null,

    /// Span reported as erroneous; its message lives in the parse errors.
    Error,
}

impl SyntaxKind {
    /// Declarations that can bind preceding comments when closed.
    pub const fn is_declaration(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::ObjectDeclaration
                | Self::Fun
                | Self::Property
                | Self::DestructuringDeclaration
                | Self::TypeAlias
                | Self::SecondaryConstructor
                | Self::ClassInitializer
                | Self::EnumEntry
                | Self::PropertyAccessor
        )
    }

    /// Upper snake case name used by tree dumps, e.g. `DOT_QUALIFIED_EXPRESSION`.
    pub fn dump_name(self) -> String {
        let debug = format!("{self:?}");
        let mut out = String::with_capacity(debug.len() + 8);
        for (i, c) in debug.chars().enumerate() {
            if c.is_ascii_uppercase() && i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_uppercase());
        }
        out
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_names() {
        assert_eq!(SyntaxKind::File.dump_name(), "FILE");
        assert_eq!(
            SyntaxKind::DotQualifiedExpression.dump_name(),
            "DOT_QUALIFIED_EXPRESSION"
        );
        assert_eq!(SyntaxKind::Error.to_string(), "ERROR");
    }

    #[test]
    fn declaration_kinds() {
        assert!(SyntaxKind::Fun.is_declaration());
        assert!(SyntaxKind::Property.is_declaration());
        assert!(!SyntaxKind::Block.is_declaration());
    }
}
