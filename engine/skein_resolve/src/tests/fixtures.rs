//! The fixture language the resolution tests parse against.

use skein_ir::{Expr, ParseOutcome, RuntimeEffect, RuntimeExpr, RuntimeSection, TypeId, Value};
use skein_syntax::{EffectBuilder, ExpressionBuilder, SectionBuilder, SyntaxRegistry};
use skein_types::{PatternType, TypeRegistry, TypeSpec};

use crate::ResolverSession;

/// Registries for a small language: a duration literal type, a name type
/// coercible to string, and a handful of expression/effect/section
/// candidates exercising every search path.
pub(crate) struct Fixture {
    pub(crate) types: TypeRegistry,
    pub(crate) syntax: SyntaxRegistry,
    pub(crate) duration: TypeId,
    pub(crate) name: TypeId,
}

impl Fixture {
    pub(crate) fn session(&self) -> ResolverSession<'_> {
        ResolverSession::new(&self.types, &self.syntax)
    }
}

pub(crate) fn number_single() -> PatternType {
    PatternType::single(TypeId::NUMBER)
}

pub(crate) fn number_plural() -> PatternType {
    PatternType::plural(TypeId::NUMBER)
}

pub(crate) fn string_single() -> PatternType {
    PatternType::single(TypeId::STRING)
}

fn parse_duration(text: &str) -> Option<Value> {
    let n: f64 = text.strip_suffix('s')?.parse().ok()?;
    if n.is_finite() {
        Some(Value::number(n))
    } else {
        None
    }
}

#[derive(Debug)]
struct RandomNumber;

impl RuntimeExpr for RandomNumber {
    fn init(&mut self, operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        operands.is_empty()
    }

    fn return_type(&self) -> TypeId {
        TypeId::NUMBER
    }
}

/// Always refuses to initialize; simulates a registration defect.
#[derive(Debug)]
struct Fragile;

impl RuntimeExpr for Fragile {
    fn init(&mut self, _operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        false
    }

    fn return_type(&self) -> TypeId {
        TypeId::NUMBER
    }
}

#[derive(Debug)]
struct Sturdy;

impl RuntimeExpr for Sturdy {
    fn init(&mut self, _operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        true
    }

    fn return_type(&self) -> TypeId {
        TypeId::NUMBER
    }
}

/// Statically plural: "every number".
#[derive(Debug)]
struct EveryNumber;

impl RuntimeExpr for EveryNumber {
    fn init(&mut self, _operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        true
    }

    fn return_type(&self) -> TypeId {
        TypeId::NUMBER
    }

    fn is_single(&self) -> bool {
        false
    }
}

/// Dynamic arity: a pile of 1 is a single value, any other size is plural.
#[derive(Debug)]
struct Pile {
    single: bool,
}

impl RuntimeExpr for Pile {
    fn init(&mut self, operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        let Some(size) = operands
            .first()
            .and_then(Expr::as_literal)
            .and_then(|literal| literal.value.as_num())
        else {
            return false;
        };
        self.single = size == 1.0;
        true
    }

    fn return_type(&self) -> TypeId {
        TypeId::NUMBER
    }

    fn is_single(&self) -> bool {
        self.single
    }
}

/// Declared to return string, actually returns the name type; resolution
/// must coerce through the registered name-to-string conversion.
#[derive(Debug)]
struct BestName {
    name: TypeId,
}

impl RuntimeExpr for BestName {
    fn init(&mut self, _operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        true
    }

    fn return_type(&self) -> TypeId {
        self.name
    }
}

/// Declared to return number, actually returns the name type, and no
/// coercion exists between the two.
#[derive(Debug)]
struct Mismatched {
    name: TypeId,
}

impl RuntimeExpr for Mismatched {
    fn init(&mut self, _operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        true
    }

    fn return_type(&self) -> TypeId {
        self.name
    }
}

#[derive(Debug)]
struct SumOf;

impl RuntimeExpr for SumOf {
    fn init(&mut self, operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        operands.len() == 1
    }

    fn return_type(&self) -> TypeId {
        TypeId::NUMBER
    }
}

#[derive(Debug)]
struct IsBig;

impl RuntimeExpr for IsBig {
    fn init(&mut self, operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        operands.len() == 1
    }

    fn return_type(&self) -> TypeId {
        TypeId::BOOLEAN
    }
}

#[derive(Debug)]
struct FlagSet;

impl RuntimeExpr for FlagSet {
    fn init(&mut self, _operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        true
    }

    fn return_type(&self) -> TypeId {
        TypeId::BOOLEAN
    }
}

#[derive(Debug)]
struct Broadcast;

impl RuntimeEffect for Broadcast {
    fn init(&mut self, operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        operands.len() == 1
    }
}

#[derive(Debug)]
struct Halt;

impl RuntimeEffect for Halt {
    fn init(&mut self, operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        operands.is_empty()
    }
}

#[derive(Debug)]
struct RepeatTimes;

impl RuntimeSection for RepeatTimes {
    fn init(&mut self, operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        operands.len() == 1
    }
}

pub(crate) fn fixture() -> Fixture {
    let mut types = TypeRegistry::new();
    let duration = types
        .register(
            TypeSpec::new("duration", "durations").literal_parser(parse_duration),
        )
        .unwrap();
    let name = types.register(TypeSpec::new("name", "names")).unwrap();
    types.add_coercion(name, TypeId::STRING, |value| Some(value.clone()));

    let mut syntax = SyntaxRegistry::new();
    // Registration order matters below: several tests rely on an earlier
    // candidate being tried (and failing) before a later one succeeds.
    syntax
        .register_expression(
            ExpressionBuilder::new("fragile gizmo", number_single(), || Box::new(Fragile))
                .pattern("the gizmo"),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("sturdy gizmo", number_single(), || Box::new(Sturdy))
                .pattern("the gizmo"),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("random number", number_single(), || Box::new(RandomNumber))
                .pattern("a random number"),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("every number", number_plural(), || Box::new(EveryNumber))
                .pattern("every number"),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("pile", number_plural(), || Box::new(Pile { single: false }))
                .pattern("a pile of %number%")
                .dynamic_arity(),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("best name", string_single(), move || {
                Box::new(BestName { name })
            })
            .pattern("the best name"),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("odd thing broken", number_single(), move || {
                Box::new(Mismatched { name })
            })
            .pattern("the odd thing"),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("odd thing", number_single(), || Box::new(Sturdy))
                .pattern("the odd thing"),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("sum of", number_single(), || Box::new(SumOf))
                .pattern("the sum of %numbers%"),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("is big", PatternType::single(TypeId::BOOLEAN), || {
                Box::new(IsBig)
            })
            .pattern("%number% is big")
            .conditional_only(),
            &types,
        )
        .unwrap();
    syntax
        .register_expression(
            ExpressionBuilder::new("flag set", PatternType::single(TypeId::BOOLEAN), || {
                Box::new(FlagSet)
            })
            .pattern("the flag is set"),
            &types,
        )
        .unwrap();

    syntax
        .register_effect(
            EffectBuilder::new("broadcast", || Box::new(Broadcast)).pattern("broadcast %string%"),
            &types,
        )
        .unwrap();
    syntax
        .register_effect(
            EffectBuilder::new("halt", || Box::new(Halt)).pattern("halt[ now]"),
            &types,
        )
        .unwrap();

    syntax
        .register_section(
            SectionBuilder::new("repeat", || Box::new(RepeatTimes))
                .pattern("repeat %number% times"),
            &types,
        )
        .unwrap();

    Fixture {
        types,
        syntax,
        duration,
        name,
    }
}
