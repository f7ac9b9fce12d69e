//! Checker flag enumerations used by the fixture oracle.
//!
//! Values mirror the checker's own enumerations, composites included, so that
//! flag-name resolution is exercised against realistic tables.

pub mod type_flags {
    pub const ANY: u32 = 1 << 0;
    pub const UNKNOWN: u32 = 1 << 1;
    pub const STRING: u32 = 1 << 2;
    pub const NUMBER: u32 = 1 << 3;
    pub const BOOLEAN: u32 = 1 << 4;
    pub const ENUM: u32 = 1 << 5;
    pub const BIG_INT: u32 = 1 << 6;
    pub const STRING_LITERAL: u32 = 1 << 7;
    pub const NUMBER_LITERAL: u32 = 1 << 8;
    pub const BOOLEAN_LITERAL: u32 = 1 << 9;
    pub const ENUM_LITERAL: u32 = 1 << 10;
    pub const BIG_INT_LITERAL: u32 = 1 << 11;
    pub const ES_SYMBOL: u32 = 1 << 12;
    pub const UNIQUE_ES_SYMBOL: u32 = 1 << 13;
    pub const VOID: u32 = 1 << 14;
    pub const UNDEFINED: u32 = 1 << 15;
    pub const NULL: u32 = 1 << 16;
    pub const NEVER: u32 = 1 << 17;
    pub const TYPE_PARAMETER: u32 = 1 << 18;
    pub const OBJECT: u32 = 1 << 19;
    pub const UNION: u32 = 1 << 20;
    pub const INTERSECTION: u32 = 1 << 21;
    pub const INDEX: u32 = 1 << 22;
    pub const INDEXED_ACCESS: u32 = 1 << 23;
    pub const CONDITIONAL: u32 = 1 << 24;
    pub const SUBSTITUTION: u32 = 1 << 25;
    pub const NON_PRIMITIVE: u32 = 1 << 26;
    pub const TEMPLATE_LITERAL: u32 = 1 << 27;
    pub const STRING_MAPPING: u32 = 1 << 28;

    pub const ANY_OR_UNKNOWN: u32 = ANY | UNKNOWN;
    pub const NULLABLE: u32 = UNDEFINED | NULL;
    pub const LITERAL: u32 = STRING_LITERAL | NUMBER_LITERAL | BIG_INT_LITERAL | BOOLEAN_LITERAL;
    pub const STRING_LIKE: u32 = STRING | STRING_LITERAL | TEMPLATE_LITERAL | STRING_MAPPING;
    pub const NUMBER_LIKE: u32 = NUMBER | NUMBER_LITERAL | ENUM;
    pub const BOOLEAN_LIKE: u32 = BOOLEAN | BOOLEAN_LITERAL;
    pub const UNION_OR_INTERSECTION: u32 = UNION | INTERSECTION;
}

pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const FUNCTION_SCOPED_VARIABLE: u32 = 1 << 0;
    pub const BLOCK_SCOPED_VARIABLE: u32 = 1 << 1;
    pub const PROPERTY: u32 = 1 << 2;
    pub const ENUM_MEMBER: u32 = 1 << 3;
    pub const FUNCTION: u32 = 1 << 4;
    pub const CLASS: u32 = 1 << 5;
    pub const INTERFACE: u32 = 1 << 6;
    pub const CONST_ENUM: u32 = 1 << 7;
    pub const REGULAR_ENUM: u32 = 1 << 8;
    pub const VALUE_MODULE: u32 = 1 << 9;
    pub const NAMESPACE_MODULE: u32 = 1 << 10;
    pub const TYPE_LITERAL: u32 = 1 << 11;
    pub const OBJECT_LITERAL: u32 = 1 << 12;
    pub const METHOD: u32 = 1 << 13;
    pub const CONSTRUCTOR: u32 = 1 << 14;
    pub const GET_ACCESSOR: u32 = 1 << 15;
    pub const SET_ACCESSOR: u32 = 1 << 16;
    pub const SIGNATURE: u32 = 1 << 17;
    pub const TYPE_PARAMETER: u32 = 1 << 18;
    pub const TYPE_ALIAS: u32 = 1 << 19;
    pub const EXPORT_VALUE: u32 = 1 << 20;
    pub const ALIAS: u32 = 1 << 21;
    pub const PROTOTYPE: u32 = 1 << 22;
    pub const EXPORT_STAR: u32 = 1 << 23;
    pub const OPTIONAL: u32 = 1 << 24;
    pub const TRANSIENT: u32 = 1 << 25;

    pub const VARIABLE: u32 = FUNCTION_SCOPED_VARIABLE | BLOCK_SCOPED_VARIABLE;
    pub const ENUM: u32 = REGULAR_ENUM | CONST_ENUM;
    pub const ACCESSOR: u32 = GET_ACCESSOR | SET_ACCESSOR;
}

pub(crate) const TYPE_FLAG_TABLE: &[(&str, u32)] = &[
    ("Any", type_flags::ANY),
    ("Unknown", type_flags::UNKNOWN),
    ("String", type_flags::STRING),
    ("Number", type_flags::NUMBER),
    ("Boolean", type_flags::BOOLEAN),
    ("Enum", type_flags::ENUM),
    ("BigInt", type_flags::BIG_INT),
    ("StringLiteral", type_flags::STRING_LITERAL),
    ("NumberLiteral", type_flags::NUMBER_LITERAL),
    ("BooleanLiteral", type_flags::BOOLEAN_LITERAL),
    ("EnumLiteral", type_flags::ENUM_LITERAL),
    ("BigIntLiteral", type_flags::BIG_INT_LITERAL),
    ("ESSymbol", type_flags::ES_SYMBOL),
    ("UniqueESSymbol", type_flags::UNIQUE_ES_SYMBOL),
    ("Void", type_flags::VOID),
    ("Undefined", type_flags::UNDEFINED),
    ("Null", type_flags::NULL),
    ("Never", type_flags::NEVER),
    ("TypeParameter", type_flags::TYPE_PARAMETER),
    ("Object", type_flags::OBJECT),
    ("Union", type_flags::UNION),
    ("Intersection", type_flags::INTERSECTION),
    ("Index", type_flags::INDEX),
    ("IndexedAccess", type_flags::INDEXED_ACCESS),
    ("Conditional", type_flags::CONDITIONAL),
    ("Substitution", type_flags::SUBSTITUTION),
    ("NonPrimitive", type_flags::NON_PRIMITIVE),
    ("TemplateLiteral", type_flags::TEMPLATE_LITERAL),
    ("StringMapping", type_flags::STRING_MAPPING),
    ("AnyOrUnknown", type_flags::ANY_OR_UNKNOWN),
    ("Nullable", type_flags::NULLABLE),
    ("Literal", type_flags::LITERAL),
    ("StringLike", type_flags::STRING_LIKE),
    ("NumberLike", type_flags::NUMBER_LIKE),
    ("BooleanLike", type_flags::BOOLEAN_LIKE),
    ("UnionOrIntersection", type_flags::UNION_OR_INTERSECTION),
];

pub(crate) const SYMBOL_FLAG_TABLE: &[(&str, u32)] = &[
    ("None", symbol_flags::NONE),
    ("FunctionScopedVariable", symbol_flags::FUNCTION_SCOPED_VARIABLE),
    ("BlockScopedVariable", symbol_flags::BLOCK_SCOPED_VARIABLE),
    ("Property", symbol_flags::PROPERTY),
    ("EnumMember", symbol_flags::ENUM_MEMBER),
    ("Function", symbol_flags::FUNCTION),
    ("Class", symbol_flags::CLASS),
    ("Interface", symbol_flags::INTERFACE),
    ("ConstEnum", symbol_flags::CONST_ENUM),
    ("RegularEnum", symbol_flags::REGULAR_ENUM),
    ("ValueModule", symbol_flags::VALUE_MODULE),
    ("NamespaceModule", symbol_flags::NAMESPACE_MODULE),
    ("TypeLiteral", symbol_flags::TYPE_LITERAL),
    ("ObjectLiteral", symbol_flags::OBJECT_LITERAL),
    ("Method", symbol_flags::METHOD),
    ("Constructor", symbol_flags::CONSTRUCTOR),
    ("GetAccessor", symbol_flags::GET_ACCESSOR),
    ("SetAccessor", symbol_flags::SET_ACCESSOR),
    ("Signature", symbol_flags::SIGNATURE),
    ("TypeParameter", symbol_flags::TYPE_PARAMETER),
    ("TypeAlias", symbol_flags::TYPE_ALIAS),
    ("ExportValue", symbol_flags::EXPORT_VALUE),
    ("Alias", symbol_flags::ALIAS),
    ("Prototype", symbol_flags::PROTOTYPE),
    ("ExportStar", symbol_flags::EXPORT_STAR),
    ("Optional", symbol_flags::OPTIONAL),
    ("Transient", symbol_flags::TRANSIENT),
    ("Variable", symbol_flags::VARIABLE),
    ("Enum", symbol_flags::ENUM),
    ("Accessor", symbol_flags::ACCESSOR),
];
