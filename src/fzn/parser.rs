//! # FlatZinc Parser
//!
//! Internal module built from `nom` combinators. Whitespace and `%` comments
//! are skipped in front of every token.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace1, not_line_ending, satisfy},
    combinator::{map, map_res, not, opt, recognize, value},
    error::{Error as NomError, ErrorKind},
    multi::{many0, many0_count, separated_list0},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult, Parser,
};

use super::{Annotation, Expr, Item, ParType, ParseError, SetLit, SolveGoal, VarType};

type PResult<'a, O> = IResult<&'a str, O>;

/// Parses all items of a model
pub(super) fn items(src: &str) -> Result<Vec<Item>, ParseError> {
    let mut items = Vec::new();
    let mut rest = src;
    loop {
        rest = skip(rest).map_or(rest, |(rest, ())| rest);
        if rest.is_empty() {
            return Ok(items);
        }
        match item(rest) {
            Ok((next, item)) => {
                items.push(item);
                rest = next;
            }
            Err(nom::Err::Error(err) | nom::Err::Failure(err)) => {
                let snippet: String = err
                    .input
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .chars()
                    .take(24)
                    .collect();
                let message = match err.code {
                    ErrorKind::Verify => format!("declaration requires a value near `{snippet}`"),
                    _ if err.input.is_empty() => String::from("unexpected end of input"),
                    _ => format!("unexpected input `{snippet}`"),
                };
                return Err(ParseError::at(src, err.input, message));
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(ParseError::at(src, "", "unexpected end of input"))
            }
        }
    }
}

fn skip(input: &str) -> PResult<'_, ()> {
    value(
        (),
        many0_count(alt((multispace1, preceded(char('%'), not_line_ending)))),
    )(input)
}

fn lex<'a, O, P>(parser: P) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    P: Parser<&'a str, O, NomError<&'a str>>,
{
    preceded(skip, parser)
}

fn sym<'a>(symbol: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    lex(tag(symbol))
}

fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    lex(terminated(
        tag(kw),
        not(satisfy(|c: char| c.is_alphanumeric() || c == '_')),
    ))
}

fn ident(input: &str) -> PResult<'_, &str> {
    lex(recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    )))(input)
}

fn int(input: &str) -> PResult<'_, i64> {
    lex(map_res(
        recognize(pair(opt(char('-')), digit1)),
        str::parse::<i64>,
    ))(input)
}

fn range(input: &str) -> PResult<'_, (i64, i64)> {
    separated_pair(int, sym(".."), int)(input)
}

fn set_lit(input: &str) -> PResult<'_, Vec<i64>> {
    map(
        delimited(sym("{"), separated_list0(sym(","), int), sym("}")),
        |mut elems: Vec<i64>| {
            elems.sort_unstable();
            elems.dedup();
            elems
        },
    )(input)
}

fn args(input: &str) -> PResult<'_, Vec<Expr>> {
    delimited(sym("("), separated_list0(sym(","), expr), sym(")"))(input)
}

fn index_access(input: &str) -> PResult<'_, i64> {
    delimited(sym("["), int, sym("]"))(input)
}

fn ident_expr(input: &str) -> PResult<'_, Expr> {
    let (input, name) = ident(input)?;
    if let Ok((rest, idx)) = index_access(input) {
        return Ok((rest, Expr::Access(name.to_string(), idx)));
    }
    if let Ok((rest, args)) = args(input) {
        return Ok((rest, Expr::Call(name.to_string(), args)));
    }
    Ok((input, Expr::Ident(name.to_string())))
}

fn expr(input: &str) -> PResult<'_, Expr> {
    alt((
        map(
            alt((value(true, keyword("true")), value(false, keyword("false")))),
            Expr::Bool,
        ),
        map(
            lex(delimited(char('"'), take_until("\""), char('"'))),
            |s: &str| Expr::Str(s.to_string()),
        ),
        map(
            delimited(sym("["), separated_list0(sym(","), expr), sym("]")),
            Expr::Array,
        ),
        map(set_lit, |elems| Expr::Set(SetLit::Elems(elems))),
        map(pair(int, opt(preceded(sym(".."), int))), |(lo, hi)| match hi {
            Some(hi) => Expr::Set(SetLit::Range(lo, hi)),
            None => Expr::Int(lo),
        }),
        ident_expr,
    ))(input)
}

fn annotation(input: &str) -> PResult<'_, Annotation> {
    map(pair(ident, opt(args)), |(name, args)| Annotation {
        name: name.to_string(),
        args: args.unwrap_or_default(),
    })(input)
}

fn annotations(input: &str) -> PResult<'_, Vec<Annotation>> {
    many0(preceded(sym("::"), annotation))(input)
}

fn var_type(input: &str) -> PResult<'_, VarType> {
    preceded(
        keyword("var"),
        alt((
            value(VarType::Bool, keyword("bool")),
            value(VarType::Int, keyword("int")),
            preceded(
                pair(keyword("set"), keyword("of")),
                alt((
                    value(VarType::SetOfInt, keyword("int")),
                    map(range, |(lo, hi)| VarType::SetOf((lo..=hi).collect())),
                    map(set_lit, VarType::SetOf),
                )),
            ),
            map(range, |(lo, hi)| VarType::IntRange(lo, hi)),
            map(set_lit, VarType::IntSet),
        )),
    )(input)
}

fn par_type(input: &str) -> PResult<'_, ParType> {
    alt((
        value(ParType::Bool, keyword("bool")),
        value(ParType::Int, keyword("int")),
        value(
            ParType::SetOfInt,
            tuple((
                keyword("set"),
                keyword("of"),
                alt((keyword("int"), recognize(range), recognize(set_lit))),
            )),
        ),
        value(ParType::Int, range),
        value(ParType::Int, set_lit),
    ))(input)
}

fn array_index(input: &str) -> PResult<'_, (i64, i64)> {
    delimited(
        keyword("array"),
        delimited(sym("["), range, sym("]")),
        keyword("of"),
    )(input)
}

type DeclTail = (String, Vec<Annotation>, Option<Expr>);

fn decl_tail(input: &str) -> PResult<'_, DeclTail> {
    map(
        tuple((
            sym(":"),
            ident,
            annotations,
            opt(preceded(sym("="), expr)),
            sym(";"),
        )),
        |(_, name, annotations, value, _)| (name.to_string(), annotations, value),
    )(input)
}

fn decl(input: &str) -> PResult<'_, Item> {
    let (input, array) = opt(array_index)(input)?;
    if let Ok((after_ty, ty)) = var_type(input) {
        let (rest, (name, annotations, value)) = decl_tail(after_ty)?;
        let item = match array {
            None => Item::Variable {
                name,
                ty,
                annotations,
                value,
            },
            Some(index) => {
                let Some(value) = value else {
                    return Err(nom::Err::Failure(NomError::new(input, ErrorKind::Verify)));
                };
                Item::Array {
                    name,
                    index,
                    ty,
                    annotations,
                    value,
                }
            }
        };
        return Ok((rest, item));
    }
    let (after_ty, ty) = par_type(input)?;
    let (rest, (name, _, value)) = decl_tail(after_ty)?;
    let Some(value) = value else {
        return Err(nom::Err::Failure(NomError::new(input, ErrorKind::Verify)));
    };
    Ok((
        rest,
        Item::Parameter {
            name,
            ty,
            array,
            value,
        },
    ))
}

fn predicate(input: &str) -> PResult<'_, Item> {
    map(
        delimited(keyword("predicate"), ident, pair(take_until(";"), char(';'))),
        |name| Item::Predicate(name.to_string()),
    )(input)
}

fn constraint(input: &str) -> PResult<'_, Item> {
    map(
        tuple((keyword("constraint"), ident, args, annotations, sym(";"))),
        |(_, name, args, annotations, _)| Item::Constraint {
            name: name.to_string(),
            args,
            annotations,
        },
    )(input)
}

fn solve(input: &str) -> PResult<'_, Item> {
    map(
        tuple((
            keyword("solve"),
            annotations,
            alt((
                value(SolveGoal::Satisfy, keyword("satisfy")),
                map(preceded(keyword("minimize"), expr), SolveGoal::Minimize),
                map(preceded(keyword("maximize"), expr), SolveGoal::Maximize),
            )),
            sym(";"),
        )),
        |(_, annotations, goal, _)| Item::Solve { goal, annotations },
    )(input)
}

fn item(input: &str) -> PResult<'_, Item> {
    alt((predicate, constraint, solve, decl))(input)
}
