// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Reading SPIR-V assembly text.
//!
//! The accepted syntax is the one produced by `spirv-dis`: one instruction per line, an optional
//! `%result =` prefix, then the opcode and its operands. IDs are named (`%main`, `%v4float`) or
//! numbered (`%12`); names are given numbers in order of first appearance. Text after `;` is a
//! comment.
//!
//! ```
//! use vulkano_builtins::{spirv::assemble::assemble, Version};
//!
//! let spirv = assemble(
//!     r#"
//!     OpCapability Shader
//!     OpMemoryModel Logical GLSL450
//!     %float = OpTypeFloat 32
//!     "#,
//!     Version::V1_0,
//! )
//! .unwrap();
//! assert_eq!(spirv.types_global_values().len(), 1);
//! ```

use super::{
    AddressingModel, BuiltIn, Capability, Decoration, ExecutionMode, ExecutionModel, Id,
    Instruction, MemoryModel, Operand, Spirv, SpirvError, StorageClass,
};
use crate::Version;
use foldhash::HashMap;
use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, tag_no_case, take_while1},
    character::complete::{
        char, digit0, digit1, hex_digit1, one_of, satisfy, space0, space1,
    },
    combinator::{eof, map, not, opt, recognize, rest, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use std::{
    error::Error,
    fmt::{Display, Error as FmtError, Formatter},
};

/// Assembles SPIR-V assembly text into a [`Spirv`] module.
pub fn assemble(source: &str, version: Version) -> Result<Spirv, AssembleError> {
    let mut assembler = Assembler::default();
    let mut instructions = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let statement = match statement(text) {
            Ok((_, statement)) => statement,
            Err(_) => {
                return Err(AssembleError {
                    line,
                    kind: AssembleErrorKind::Syntax,
                })
            }
        };

        if let Some(statement) = statement {
            let instruction = assembler
                .instruction(statement)
                .map_err(|kind| AssembleError { line, kind })?;
            instructions.push(instruction);
        }
    }

    Spirv::new(version, instructions).map_err(|err| AssembleError {
        line: 0,
        kind: AssembleErrorKind::Module(err),
    })
}

/// Error that can happen when assembling SPIR-V text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembleError {
    /// The line that the error occurred on, starting at 1. Zero for errors that concern the
    /// module as a whole.
    pub line: usize,
    pub kind: AssembleErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssembleErrorKind {
    /// The line could not be split into a result, an opcode and operands.
    Syntax,
    MissingResultId {
        opcode: String,
    },
    UnexpectedResultId {
        opcode: String,
    },
    MissingOperand {
        opcode: String,
        expected: &'static str,
    },
    InvalidOperand {
        opcode: String,
        expected: &'static str,
    },
    TrailingOperands {
        opcode: String,
    },
    UnknownEnumerant {
        kind: &'static str,
        name: String,
    },
    /// A constant's value is given for a type that isn't a scalar number.
    UnsupportedConstantType {
        opcode: String,
    },
    Module(SpirvError),
}

impl Error for AssembleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            AssembleErrorKind::Module(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for AssembleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        if self.line != 0 {
            write!(f, "line {}: ", self.line)?;
        }

        match &self.kind {
            AssembleErrorKind::Syntax => write!(f, "syntax error"),
            AssembleErrorKind::MissingResultId { opcode } => {
                write!(f, "{} needs a result ID", opcode)
            }
            AssembleErrorKind::UnexpectedResultId { opcode } => {
                write!(f, "{} does not have a result ID", opcode)
            }
            AssembleErrorKind::MissingOperand { opcode, expected } => {
                write!(f, "{} is missing an operand: expected {}", opcode, expected)
            }
            AssembleErrorKind::InvalidOperand { opcode, expected } => {
                write!(f, "invalid operand for {}: expected {}", opcode, expected)
            }
            AssembleErrorKind::TrailingOperands { opcode } => {
                write!(f, "{} has too many operands", opcode)
            }
            AssembleErrorKind::UnknownEnumerant { kind, name } => {
                write!(f, "`{}` is not a known {}", name, kind)
            }
            AssembleErrorKind::UnsupportedConstantType { opcode } => write!(
                f,
                "the value of {} can only be given for an integer or floating-point type",
                opcode,
            ),
            AssembleErrorKind::Module(err) => err.fmt(f),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token<'a> {
    Id(&'a str),
    String(String),
    Number(&'a str),
    Word(&'a str),
}

#[derive(Clone, Debug, PartialEq)]
struct Statement<'a> {
    result: Option<&'a str>,
    opcode: &'a str,
    operands: Vec<Token<'a>>,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn id(input: &str) -> IResult<&str, &str> {
    preceded(char('%'), take_while1(is_name_char))(input)
}

fn string(input: &str) -> IResult<&str, String> {
    map(
        delimited(
            char('"'),
            opt(escaped_transform(
                is_not("\\\""),
                '\\',
                alt((value("\\", char('\\')), value("\"", char('"')))),
            )),
            char('"'),
        ),
        Option::unwrap_or_default,
    )(input)
}

fn number(input: &str) -> IResult<&str, &str> {
    let numeral = recognize(pair(
        opt(char('-')),
        alt((
            recognize(pair(tag_no_case("0x"), hex_digit1)),
            recognize(tuple((
                digit1,
                opt(pair(char('.'), digit0)),
                opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
            ))),
        )),
    ));

    // `2D` is an enumerant, not a number followed by garbage.
    terminated(numeral, not(satisfy(is_name_char)))(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(
        char('|'),
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn operand(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        map(id, Token::Id),
        map(string, Token::String),
        map(number, Token::Number),
        map(word, Token::Word),
    ))(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(char(';'), rest))(input)
}

fn statement(input: &str) -> IResult<&str, Option<Statement<'_>>> {
    let (input, _) = space0(input)?;
    let (input, statement) = opt(map(
        tuple((
            opt(terminated(id, tuple((space0, char('='), space0)))),
            preceded(tag("Op"), take_while1(|c: char| c.is_ascii_alphanumeric())),
            many0(preceded(space1, operand)),
        )),
        |(result, opcode, operands)| Statement {
            result,
            opcode,
            operands,
        },
    ))(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = opt(comment)(input)?;
    let (input, _) = eof(input)?;

    Ok((input, statement))
}

#[derive(Clone, Copy, Debug)]
enum ScalarKind {
    Int { signed: bool },
    Float,
}

#[derive(Default)]
struct Assembler<'a> {
    ids: HashMap<&'a str, Id>,
    scalar_types: HashMap<Id, (ScalarKind, u32)>,
}

impl<'a> Assembler<'a> {
    fn id(&mut self, name: &'a str) -> Id {
        let next = Id(self.ids.len() as u32 + 1);
        *self.ids.entry(name).or_insert(next)
    }

    fn instruction(
        &mut self,
        statement: Statement<'a>,
    ) -> Result<Instruction, AssembleErrorKind> {
        let Statement {
            result,
            opcode,
            operands,
        } = statement;
        let opcode_name = format!("Op{}", opcode);
        let result = result.map(|name| self.id(name));
        let result_id = || {
            result.ok_or_else(|| AssembleErrorKind::MissingResultId {
                opcode: opcode_name.clone(),
            })
        };
        let mut ops = Operands {
            assembler: self,
            opcode: &opcode_name,
            tokens: operands.into_iter(),
        };

        let instruction = match opcode {
            "Nop" => Instruction::Nop,
            "Capability" => Instruction::Capability {
                capability: ops.enumerant("capability", Capability::from_name)?,
            },
            "Extension" => Instruction::Extension {
                name: ops.string()?,
            },
            "ExtInstImport" => Instruction::ExtInstImport {
                result_id: result_id()?,
                name: ops.string()?,
            },
            "MemoryModel" => Instruction::MemoryModel {
                addressing_model: ops.enumerant("addressing model", AddressingModel::from_name)?,
                memory_model: ops.enumerant("memory model", MemoryModel::from_name)?,
            },
            "EntryPoint" => Instruction::EntryPoint {
                execution_model: ops.enumerant("execution model", ExecutionModel::from_name)?,
                entry_point: ops.id()?,
                name: ops.string()?,
                interface: ops.ids()?,
            },
            "ExecutionMode" => Instruction::ExecutionMode {
                entry_point: ops.id()?,
                mode: ops.enumerant("execution mode", ExecutionMode::from_name)?,
                operands: ops.literals()?,
            },
            "ExecutionModeId" => Instruction::ExecutionModeId {
                entry_point: ops.id()?,
                mode: ops.enumerant("execution mode", ExecutionMode::from_name)?,
                operands: ops.ids()?,
            },
            "Name" => Instruction::Name {
                target: ops.id()?,
                name: ops.string()?,
            },
            "MemberName" => Instruction::MemberName {
                ty: ops.id()?,
                member: ops.literal()?,
                name: ops.string()?,
            },
            "Decorate" => Instruction::Decorate {
                target: ops.id()?,
                decoration: ops.decoration()?,
            },
            "MemberDecorate" => Instruction::MemberDecorate {
                structure_type: ops.id()?,
                member: ops.literal()?,
                decoration: ops.decoration()?,
            },
            "DecorationGroup" => Instruction::DecorationGroup {
                result_id: result_id()?,
            },
            "GroupDecorate" => Instruction::GroupDecorate {
                decoration_group: ops.id()?,
                targets: ops.ids()?,
            },
            "GroupMemberDecorate" => {
                let decoration_group = ops.id()?;
                let mut targets = Vec::new();

                while !ops.is_empty() {
                    targets.push((ops.id()?, ops.literal()?));
                }

                Instruction::GroupMemberDecorate {
                    decoration_group,
                    targets,
                }
            }
            "TypeVoid" => Instruction::TypeVoid {
                result_id: result_id()?,
            },
            "TypeBool" => Instruction::TypeBool {
                result_id: result_id()?,
            },
            "TypeInt" => {
                let result_id = result_id()?;
                let width = ops.literal()?;
                let signedness = ops.literal()?;
                ops.assembler.scalar_types.insert(
                    result_id,
                    (
                        ScalarKind::Int {
                            signed: signedness != 0,
                        },
                        width,
                    ),
                );

                Instruction::TypeInt {
                    result_id,
                    width,
                    signedness,
                }
            }
            "TypeFloat" => {
                let result_id = result_id()?;
                let width = ops.literal()?;
                ops.assembler
                    .scalar_types
                    .insert(result_id, (ScalarKind::Float, width));

                Instruction::TypeFloat { result_id, width }
            }
            "TypeVector" => Instruction::TypeVector {
                result_id: result_id()?,
                component_type: ops.id()?,
                component_count: ops.literal()?,
            },
            "TypeMatrix" => Instruction::TypeMatrix {
                result_id: result_id()?,
                column_type: ops.id()?,
                column_count: ops.literal()?,
            },
            "TypeArray" => Instruction::TypeArray {
                result_id: result_id()?,
                element_type: ops.id()?,
                length: ops.id()?,
            },
            "TypeRuntimeArray" => Instruction::TypeRuntimeArray {
                result_id: result_id()?,
                element_type: ops.id()?,
            },
            "TypeStruct" => Instruction::TypeStruct {
                result_id: result_id()?,
                member_types: ops.ids()?,
            },
            "TypePointer" => Instruction::TypePointer {
                result_id: result_id()?,
                storage_class: ops.enumerant("storage class", StorageClass::from_name)?,
                ty: ops.id()?,
            },
            "TypeFunction" => Instruction::TypeFunction {
                result_id: result_id()?,
                return_type: ops.id()?,
                parameter_types: ops.ids()?,
            },
            "ConstantTrue" => Instruction::ConstantTrue {
                result_type_id: ops.id()?,
                result_id: result_id()?,
            },
            "ConstantFalse" => Instruction::ConstantFalse {
                result_type_id: ops.id()?,
                result_id: result_id()?,
            },
            "Constant" => {
                let result_type_id = ops.id()?;
                Instruction::Constant {
                    result_type_id,
                    result_id: result_id()?,
                    value: ops.scalar_value(result_type_id)?,
                }
            }
            "ConstantComposite" => Instruction::ConstantComposite {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                constituents: ops.ids()?,
            },
            "ConstantNull" => Instruction::ConstantNull {
                result_type_id: ops.id()?,
                result_id: result_id()?,
            },
            "SpecConstantTrue" => Instruction::SpecConstantTrue {
                result_type_id: ops.id()?,
                result_id: result_id()?,
            },
            "SpecConstantFalse" => Instruction::SpecConstantFalse {
                result_type_id: ops.id()?,
                result_id: result_id()?,
            },
            "SpecConstant" => {
                let result_type_id = ops.id()?;
                Instruction::SpecConstant {
                    result_type_id,
                    result_id: result_id()?,
                    value: ops.scalar_value(result_type_id)?,
                }
            }
            "SpecConstantComposite" => Instruction::SpecConstantComposite {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                constituents: ops.ids()?,
            },
            "SpecConstantOp" => Instruction::SpecConstantOp {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                operation: ops.word("operation name")?.to_owned(),
                operands: ops.rest(),
            },
            "Variable" => Instruction::Variable {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                storage_class: ops.enumerant("storage class", StorageClass::from_name)?,
                initializer: ops.opt_id()?,
            },
            "Function" => Instruction::Function {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                function_control: ops.function_control()?,
                function_type: ops.id()?,
            },
            "FunctionParameter" => Instruction::FunctionParameter {
                result_type_id: ops.id()?,
                result_id: result_id()?,
            },
            "FunctionEnd" => Instruction::FunctionEnd,
            "FunctionCall" => Instruction::FunctionCall {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                function: ops.id()?,
                arguments: ops.ids()?,
            },
            "Label" => Instruction::Label {
                result_id: result_id()?,
            },
            "Load" => Instruction::Load {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                pointer: ops.id()?,
                memory_operands: ops.rest(),
            },
            "Store" => Instruction::Store {
                pointer: ops.id()?,
                object: ops.id()?,
                memory_operands: ops.rest(),
            },
            "CopyMemory" => Instruction::CopyMemory {
                target: ops.id()?,
                source: ops.id()?,
                memory_operands: ops.rest(),
            },
            "AccessChain" => Instruction::AccessChain {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                base: ops.id()?,
                indexes: ops.ids()?,
            },
            "InBoundsAccessChain" => Instruction::InBoundsAccessChain {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                base: ops.id()?,
                indexes: ops.ids()?,
            },
            "CopyObject" => Instruction::CopyObject {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                operand: ops.id()?,
            },
            "CompositeConstruct" => Instruction::CompositeConstruct {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                constituents: ops.ids()?,
            },
            "CompositeExtract" => Instruction::CompositeExtract {
                result_type_id: ops.id()?,
                result_id: result_id()?,
                composite: ops.id()?,
                indexes: ops.literals()?,
            },
            "Branch" => Instruction::Branch {
                target_label: ops.id()?,
            },
            "Return" => Instruction::Return,
            "ReturnValue" => Instruction::ReturnValue { value: ops.id()? },
            "Kill" => Instruction::Kill,
            "Unreachable" => Instruction::Unreachable,
            _ => Instruction::Unknown {
                name: opcode_name.clone(),
                result_id: result,
                operands: ops.rest(),
            },
        };

        if !ops.is_empty() {
            return Err(AssembleErrorKind::TrailingOperands {
                opcode: opcode_name,
            });
        }

        if result.is_some() && instruction.result_id().is_none() {
            return Err(AssembleErrorKind::UnexpectedResultId {
                opcode: opcode_name,
            });
        }

        Ok(instruction)
    }
}

struct Operands<'s, 'a> {
    assembler: &'s mut Assembler<'a>,
    opcode: &'s str,
    tokens: std::vec::IntoIter<Token<'a>>,
}

impl<'s, 'a> Operands<'s, 'a> {
    fn is_empty(&self) -> bool {
        self.tokens.as_slice().is_empty()
    }

    fn next(&mut self, expected: &'static str) -> Result<Token<'a>, AssembleErrorKind> {
        self.tokens
            .next()
            .ok_or_else(|| AssembleErrorKind::MissingOperand {
                opcode: self.opcode.to_owned(),
                expected,
            })
    }

    fn invalid(&self, expected: &'static str) -> AssembleErrorKind {
        AssembleErrorKind::InvalidOperand {
            opcode: self.opcode.to_owned(),
            expected,
        }
    }

    fn id(&mut self) -> Result<Id, AssembleErrorKind> {
        match self.next("an ID")? {
            Token::Id(name) => Ok(self.assembler.id(name)),
            _ => Err(self.invalid("an ID")),
        }
    }

    fn opt_id(&mut self) -> Result<Option<Id>, AssembleErrorKind> {
        if self.is_empty() {
            Ok(None)
        } else {
            self.id().map(Some)
        }
    }

    fn ids(&mut self) -> Result<Vec<Id>, AssembleErrorKind> {
        let mut ids = Vec::new();

        while !self.is_empty() {
            ids.push(self.id()?);
        }

        Ok(ids)
    }

    fn literal(&mut self) -> Result<u32, AssembleErrorKind> {
        match self.next("an integer literal")? {
            Token::Number(text) => parse_integer(text)
                .and_then(|value| {
                    u32::try_from(value)
                        .ok()
                        .or_else(|| i32::try_from(value).ok().map(|value| value as u32))
                })
                .ok_or_else(|| self.invalid("a 32-bit integer literal")),
            _ => Err(self.invalid("an integer literal")),
        }
    }

    fn literals(&mut self) -> Result<Vec<u32>, AssembleErrorKind> {
        let mut literals = Vec::new();

        while !self.is_empty() {
            literals.push(self.literal()?);
        }

        Ok(literals)
    }

    fn string(&mut self) -> Result<String, AssembleErrorKind> {
        match self.next("a string")? {
            Token::String(string) => Ok(string),
            _ => Err(self.invalid("a string")),
        }
    }

    fn word(&mut self, expected: &'static str) -> Result<&'a str, AssembleErrorKind> {
        match self.next(expected)? {
            Token::Word(word) => Ok(word),
            _ => Err(self.invalid(expected)),
        }
    }

    fn enumerant<T>(
        &mut self,
        kind: &'static str,
        from_name: fn(&str) -> Option<T>,
    ) -> Result<T, AssembleErrorKind> {
        let name = self.word(kind)?;
        from_name(name).ok_or_else(|| AssembleErrorKind::UnknownEnumerant {
            kind,
            name: name.to_owned(),
        })
    }

    fn function_control(&mut self) -> Result<u32, AssembleErrorKind> {
        let mask = self.word("a function control mask")?;
        let mut value = 0;

        for name in mask.split('|') {
            value |= match name {
                "None" => 0x0,
                "Inline" => 0x1,
                "DontInline" => 0x2,
                "Pure" => 0x4,
                "Const" => 0x8,
                _ => {
                    return Err(AssembleErrorKind::UnknownEnumerant {
                        kind: "function control",
                        name: name.to_owned(),
                    })
                }
            };
        }

        Ok(value)
    }

    fn decoration(&mut self) -> Result<Decoration, AssembleErrorKind> {
        let name = self.word("a decoration")?;

        Ok(match name {
            "RelaxedPrecision" => Decoration::RelaxedPrecision,
            "SpecId" => Decoration::SpecId {
                specialization_constant_id: self.literal()?,
            },
            "Block" => Decoration::Block,
            "BufferBlock" => Decoration::BufferBlock,
            "RowMajor" => Decoration::RowMajor,
            "ColMajor" => Decoration::ColMajor,
            "ArrayStride" => Decoration::ArrayStride {
                array_stride: self.literal()?,
            },
            "MatrixStride" => Decoration::MatrixStride {
                matrix_stride: self.literal()?,
            },
            "BuiltIn" => Decoration::BuiltIn {
                built_in: self.enumerant("built-in", BuiltIn::from_name)?,
            },
            "NoPerspective" => Decoration::NoPerspective,
            "Flat" => Decoration::Flat,
            "Patch" => Decoration::Patch,
            "Centroid" => Decoration::Centroid,
            "Sample" => Decoration::Sample,
            "Invariant" => Decoration::Invariant,
            "Restrict" => Decoration::Restrict,
            "Aliased" => Decoration::Aliased,
            "Volatile" => Decoration::Volatile,
            "Coherent" => Decoration::Coherent,
            "NonWritable" => Decoration::NonWritable,
            "NonReadable" => Decoration::NonReadable,
            "Location" => Decoration::Location {
                location: self.literal()?,
            },
            "Component" => Decoration::Component {
                component: self.literal()?,
            },
            "Index" => Decoration::Index {
                index: self.literal()?,
            },
            "Binding" => Decoration::Binding {
                binding_point: self.literal()?,
            },
            "DescriptorSet" => Decoration::DescriptorSet {
                descriptor_set: self.literal()?,
            },
            "Offset" => Decoration::Offset {
                byte_offset: self.literal()?,
            },
            "InputAttachmentIndex" => Decoration::InputAttachmentIndex {
                attachment_index: self.literal()?,
            },
            "PerPrimitiveEXT" | "PerPrimitiveNV" => Decoration::PerPrimitiveEXT,
            "PerViewNV" => Decoration::PerViewNV,
            "PerTaskNV" => Decoration::PerTaskNV,
            "PerVertexKHR" | "PerVertexNV" => Decoration::PerVertexKHR,
            _ => Decoration::Other {
                name: name.to_owned(),
                operands: self.rest(),
            },
        })
    }

    /// Encodes the literal value of a scalar constant according to its type.
    fn scalar_value(&mut self, result_type_id: Id) -> Result<Vec<u32>, AssembleErrorKind> {
        let &(kind, width) = self
            .assembler
            .scalar_types
            .get(&result_type_id)
            .ok_or_else(|| AssembleErrorKind::UnsupportedConstantType {
                opcode: self.opcode.to_owned(),
            })?;
        let text = match self.next("a numeric literal")? {
            Token::Number(text) => text,
            _ => return Err(self.invalid("a numeric literal")),
        };

        let bits: u64 = match kind {
            ScalarKind::Int { signed } => {
                let value = parse_integer(text).ok_or_else(|| self.invalid("an integer"))?;
                let bits = value as u64;

                if width < 64 {
                    let shift = 64 - width;

                    if signed {
                        (((bits << shift) as i64) >> shift) as u64
                    } else {
                        (bits << shift) >> shift
                    }
                } else {
                    bits
                }
            }
            ScalarKind::Float => {
                let value: f64 = match parse_integer(text) {
                    Some(value) if !text.contains('.') => value as f64,
                    _ => text
                        .parse()
                        .map_err(|_| self.invalid("a floating-point number"))?,
                };

                match width {
                    16 => half::f16::from_f64(value).to_bits() as u64,
                    32 => (value as f32).to_bits() as u64,
                    _ => value.to_bits(),
                }
            }
        };

        Ok(if width > 32 {
            vec![bits as u32, (bits >> 32) as u32]
        } else {
            vec![bits as u32]
        })
    }

    /// Takes the remaining operands without interpreting them.
    fn rest(&mut self) -> Vec<Operand> {
        let mut operands = Vec::new();

        for token in self.tokens.by_ref() {
            operands.push(match token {
                Token::Id(name) => Operand::Id(self.assembler.id(name)),
                Token::String(string) => Operand::String(string),
                Token::Number(text) => match parse_integer(text) {
                    Some(value) => Operand::Literal(value as u32),
                    None => Operand::Literal(text.parse::<f32>().map_or(0, f32::to_bits)),
                },
                Token::Word(word) => Operand::Enumerant(word.to_owned()),
            });
        }

        operands
    }
}

fn parse_integer(text: &str) -> Option<i128> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };

    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i128::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i128>().ok()?,
    };

    Some(if negative { -magnitude } else { magnitude })
}
