//! The operator catalog.
//!
//! One static table describes every operator: its spelling, what it does
//! (`OpKind`), how many operands it takes, and its infix precedence. The
//! same rows drive RPN dispatch and the infix grammar, so the two
//! notations cannot drift apart. Several spellings may share a kind
//! (`*` and `x`, `^` and `**`, `chs` and `negate`).

/// What an operator does, independent of its spellings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    // arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // bitwise and shifts
    Shr,
    Shl,
    BitAnd,
    BitOr,
    BitXor,
    SetBit,
    ClearBit,
    BitNot,
    // assignment marker (meaningful only in infix expressions)
    Assign,
    // unary numeric
    ChSign,
    Nop,
    Recip,
    Sqrt,
    Abs,
    Frac,
    Int,
    // transcendental
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Exp,
    Ln,
    Log2,
    Log10,
    // logical and comparison
    LogicalAnd,
    LogicalOr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    LogicalNot,
    // infix delimiters
    OpenParen,
    CloseParen,
    // stack manipulation
    Clear,
    Pop,
    Dup,
    LastX,
    Exchange,
    Mark,
    Sum,
    Avg,
    // off-stack registers and constants
    Store(u8),
    Recall(u8),
    Pi,
    E,
    // unit conversions
    InToMm,
    MmToIn,
    FtToM,
    MToFt,
    MiToKm,
    KmToMi,
    FToC,
    CToF,
    OzToG,
    GToOz,
    OzToMl,
    MlToOz,
    QtToL,
    LToQt,
    DegToRad,
    RadToDeg,
    // display
    PrintStack,
    PrintTop,
    PrintFloat,
    PrintDec,
    PrintUns,
    PrintHex,
    PrintOct,
    PrintBin,
    PrintRaw,
    PrintState,
    // modes and toggles
    ModeFloat,
    ModeDec,
    ModeUns,
    ModeHex,
    ModeOct,
    ModeBin,
    ModeRaw,
    Precision,
    Decimals,
    SetWidth,
    Degrees,
    AutoPrint,
    Separators,
    ModeInfo,
    Rounding,
    ErrorExit,
    // housekeeping
    Help,
    Precedence,
    Quit,
}

/// Operand behavior of a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Pops two operands and applies `y OP x`.
    Binary,
    /// Pops one operand.
    Unary,
    /// Manipulates the calculator itself; not usable inside infix.
    Pseudo,
    /// Named constant: pushes a value without popping.
    Constant,
    /// Can sit to the left of `=` in an infix expression.
    Assignable,
}

/// One row of the operator catalog.
///
/// An empty `help` string means the entry shares the help text of the
/// next row (used for aliases).
#[derive(Debug)]
pub struct OpDesc {
    pub name: &'static str,
    pub kind: OpKind,
    pub arity: Arity,
    pub prec: u8,
    pub help: &'static str,
}

const fn op(name: &'static str, kind: OpKind, arity: Arity, prec: u8, help: &'static str) -> OpDesc {
    OpDesc {
        name,
        kind,
        arity,
        prec,
        help,
    }
}

use Arity::{Assignable, Binary, Constant, Pseudo, Unary};

/// The full operator table. Order matters only for help output.
pub static CATALOG: &[OpDesc] = &[
    // two-operand numerical operators
    op("+", OpKind::Add, Binary, 18, ""),
    op("-", OpKind::Sub, Binary, 18, "Add and subtract x and y"),
    op("*", OpKind::Mul, Binary, 20, ""),
    op("x", OpKind::Mul, Binary, 20, "Multiply x and y"),
    op("/", OpKind::Div, Binary, 20, ""),
    op("%", OpKind::Mod, Binary, 20, "Divide and modulo of y by x"),
    op("^", OpKind::Pow, Binary, 22, ""),
    op("**", OpKind::Pow, Binary, 22, "Raise y to the x'th power"),
    op(">>", OpKind::Shr, Binary, 16, ""),
    op("<<", OpKind::Shl, Binary, 16, "Right/left logical shift of y by x bits"),
    op("&", OpKind::BitAnd, Binary, 14, ""),
    op("|", OpKind::BitOr, Binary, 10, ""),
    op("xor", OpKind::BitXor, Binary, 12, "Bitwise AND, OR, and XOR of y and x"),
    op("setb", OpKind::SetBit, Binary, 10, ""),
    op("clearb", OpKind::ClearBit, Binary, 14, "Set and clear bit x in y"),
    op("=", OpKind::Assign, Binary, 1, "Assign to a variable or storage register"),
    // one-operand numerical operators
    op("~", OpKind::BitNot, Unary, 26, "Bitwise NOT of x (1's complement)"),
    op("chs", OpKind::ChSign, Unary, 26, ""),
    op("negate", OpKind::ChSign, Unary, 26, "Change sign of x (2's complement)"),
    op("nop", OpKind::Nop, Unary, 26, "Does nothing"),
    op("recip", OpKind::Recip, Unary, 26, ""),
    op("sqrt", OpKind::Sqrt, Unary, 26, "Reciprocal and square root of x"),
    op("sin", OpKind::Sin, Unary, 26, ""),
    op("cos", OpKind::Cos, Unary, 26, ""),
    op("tan", OpKind::Tan, Unary, 26, ""),
    op("asin", OpKind::Asin, Unary, 26, ""),
    op("acos", OpKind::Acos, Unary, 26, ""),
    op("atan", OpKind::Atan, Unary, 26, "Trig functions"),
    op("atan2", OpKind::Atan2, Binary, 26, "Arctan of y/x (2 operands)"),
    op("exp", OpKind::Exp, Unary, 26, "Raise e to the x'th power"),
    op("ln", OpKind::Ln, Unary, 26, ""),
    op("log2", OpKind::Log2, Unary, 26, ""),
    op("log10", OpKind::Log10, Unary, 26, "Natural, base 2, and base 10 logarithms"),
    op("abs", OpKind::Abs, Unary, 26, ""),
    op("frac", OpKind::Frac, Unary, 26, ""),
    op("int", OpKind::Int, Unary, 26, "Absolute value, fractional and integer parts of x"),
    op("(", OpKind::OpenParen, Pseudo, 28, ""),
    op(")", OpKind::CloseParen, Pseudo, 0, "Begin and end \"infix\" expression"),
    // logical operators
    op("&&", OpKind::LogicalAnd, Binary, 4, ""),
    op("||", OpKind::LogicalOr, Binary, 2, "Logical AND and OR"),
    op("==", OpKind::Eq, Binary, 6, ""),
    op("!=", OpKind::Ne, Binary, 6, ""),
    op("<", OpKind::Lt, Binary, 8, ""),
    op("<=", OpKind::Le, Binary, 8, ""),
    op(">", OpKind::Gt, Binary, 8, ""),
    op(">=", OpKind::Ge, Binary, 8, "Arithmetic comparisons"),
    op("!", OpKind::LogicalNot, Unary, 26, "Logical NOT of x"),
    // stack manipulation
    op("clear", OpKind::Clear, Pseudo, 0, "Clear stack"),
    op("pop", OpKind::Pop, Pseudo, 0, "Pop (and discard) x"),
    op("push", OpKind::Dup, Pseudo, 0, ""),
    op("dup", OpKind::Dup, Pseudo, 0, "Push (a duplicate of) x"),
    op("lastx", OpKind::LastX, Constant, 0, ""),
    op("lx", OpKind::LastX, Constant, 0, "Fetch previous value of x"),
    op("exch", OpKind::Exchange, Pseudo, 0, ""),
    op("swap", OpKind::Exchange, Pseudo, 0, "Exchange x and y"),
    op("mark", OpKind::Mark, Pseudo, 0, "Mark stack for later summing"),
    op("sum", OpKind::Sum, Pseudo, 0, "Sum stack to \"mark\", or entire stack if no mark"),
    op("avg", OpKind::Avg, Pseudo, 0, "Average stack to \"mark\", or entire stack if no mark"),
    // constants and storage
    op("store", OpKind::Store(1), Assignable, 0, ""),
    op("recall", OpKind::Recall(1), Constant, 0, "Same as s1 and r1"),
    op("s1", OpKind::Store(1), Assignable, 0, ""),
    op("s2", OpKind::Store(2), Assignable, 0, ""),
    op("s3", OpKind::Store(3), Assignable, 0, ""),
    op("s4", OpKind::Store(4), Assignable, 0, ""),
    op("s5", OpKind::Store(5), Assignable, 0, "Save x off-stack (to 5 locations)"),
    op("r1", OpKind::Recall(1), Constant, 0, ""),
    op("r2", OpKind::Recall(2), Constant, 0, ""),
    op("r3", OpKind::Recall(3), Constant, 0, ""),
    op("r4", OpKind::Recall(4), Constant, 0, ""),
    op("r5", OpKind::Recall(5), Constant, 0, "Fetch x (from 5 locations)"),
    op("pi", OpKind::Pi, Constant, 0, "Push constant pi"),
    op("e", OpKind::E, Constant, 0, "Push constant e"),
    // unit conversions
    op("i2mm", OpKind::InToMm, Unary, 26, ""),
    op("mm2i", OpKind::MmToIn, Unary, 26, "inches / millimeters"),
    op("ft2m", OpKind::FtToM, Unary, 26, ""),
    op("m2ft", OpKind::MToFt, Unary, 26, "feet / meters"),
    op("mi2km", OpKind::MiToKm, Unary, 26, ""),
    op("km2mi", OpKind::KmToMi, Unary, 26, "miles / kilometers"),
    op("f2c", OpKind::FToC, Unary, 26, ""),
    op("c2f", OpKind::CToF, Unary, 26, "degrees F/C"),
    op("oz2g", OpKind::OzToG, Unary, 26, ""),
    op("g2oz", OpKind::GToOz, Unary, 26, "ounces / grams"),
    op("oz2ml", OpKind::OzToMl, Unary, 26, ""),
    op("ml2oz", OpKind::MlToOz, Unary, 26, "ounces / milliliters"),
    op("q2l", OpKind::QtToL, Unary, 26, ""),
    op("l2q", OpKind::LToQt, Unary, 26, "quarts / liters"),
    op("d2r", OpKind::DegToRad, Unary, 26, ""),
    op("r2d", OpKind::RadToDeg, Unary, 26, "degrees / radians"),
    // display
    op("P", OpKind::PrintStack, Pseudo, 0, "Print whole stack according to mode"),
    op("p", OpKind::PrintTop, Pseudo, 0, "Print x according to mode"),
    op("f", OpKind::PrintFloat, Pseudo, 0, ""),
    op("d", OpKind::PrintDec, Pseudo, 0, ""),
    op("u", OpKind::PrintUns, Pseudo, 0, "Print x as float, decimal, unsigned decimal,"),
    op("h", OpKind::PrintHex, Pseudo, 0, ""),
    op("o", OpKind::PrintOct, Pseudo, 0, ""),
    op("b", OpKind::PrintBin, Pseudo, 0, "     hex, octal, or binary"),
    op("state", OpKind::PrintState, Pseudo, 0, "Show calculator state"),
    // modes
    op("F", OpKind::ModeFloat, Pseudo, 0, ""),
    op("D", OpKind::ModeDec, Pseudo, 0, ""),
    op("U", OpKind::ModeUns, Pseudo, 0, "Switch to floating point, decimal, unsigned decimal,"),
    op("H", OpKind::ModeHex, Pseudo, 0, ""),
    op("O", OpKind::ModeOct, Pseudo, 0, ""),
    op("B", OpKind::ModeBin, Pseudo, 0, "     hex, octal, or binary modes"),
    op("precision", OpKind::Precision, Pseudo, 0, ""),
    op("k", OpKind::Precision, Pseudo, 0, "Float format: number of significant digits"),
    op("decimals", OpKind::Decimals, Pseudo, 0, ""),
    op("K", OpKind::Decimals, Pseudo, 0, "Float format: digits after decimal"),
    op("width", OpKind::SetWidth, Pseudo, 0, ""),
    op("w", OpKind::SetWidth, Pseudo, 0, "Set effective word size for integer modes"),
    op("degrees", OpKind::Degrees, Pseudo, 0, "Toggle trig functions: degrees (1) or radians (0)"),
    op("autoprint", OpKind::AutoPrint, Pseudo, 0, ""),
    op("a", OpKind::AutoPrint, Pseudo, 0, "Toggle autoprinting on/off with 0/1"),
    op("separators", OpKind::Separators, Pseudo, 0, ""),
    op("s", OpKind::Separators, Pseudo, 0, "Toggle numeric separators (i.e., commas) on/off (0/1)"),
    op("mode", OpKind::ModeInfo, Pseudo, 0, "Display current mode parameters"),
    // debug support
    op("r", OpKind::PrintRaw, Pseudo, 0, "Print x as raw floating hex"),
    op("R", OpKind::ModeRaw, Pseudo, 0, "Switch to raw floating hex mode"),
    op("rounding", OpKind::Rounding, Pseudo, 0, "Toggle snapping and rounding of floats"),
    // housekeeping
    op("?", OpKind::Help, Pseudo, 0, ""),
    op("help", OpKind::Help, Pseudo, 0, "Show this list"),
    op("precedence", OpKind::Precedence, Pseudo, 0, "List infix operator precedence"),
    op("quit", OpKind::Quit, Pseudo, 0, ""),
    op("q", OpKind::Quit, Pseudo, 0, ""),
    op("exit", OpKind::Quit, Pseudo, 0, "Leave the calculator"),
    op("errorexit", OpKind::ErrorExit, Pseudo, 0, "Toggle exiting on error and warning"),
];

/// Exact-match lookup: the whole token must equal the operator name,
/// never just a prefix of it.
pub fn lookup(name: &str) -> Option<&'static OpDesc> {
    CATALOG.iter().find(|op| op.name == name)
}

/// Lookup for names the catalog is known to contain (internal rewrite
/// tokens such as `chs` and `nop`).
pub(crate) fn must(name: &str) -> &'static OpDesc {
    lookup(name).expect("operator missing from catalog")
}
