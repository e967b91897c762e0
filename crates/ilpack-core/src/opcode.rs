//! Opcode table shared by the exporter and every reader of the stream.
//!
//! The stream stores one opcode byte per instruction and an 8-byte operand
//! field with no kind tag. The byte is the position of the opcode in the
//! disassembler's sequential opcode enumeration (not the two-byte IL
//! encoding), and [`Code::operand_kind`] is the only way to know how the
//! operand field must be read back.

use std::collections::HashMap;
use std::sync::OnceLock;

/// How the 8-byte operand field of an instruction is interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OperandKind {
    /// No operand; the field is zero.
    None,
    /// Sign- or zero-extended integer literal.
    Integer,
    /// IEEE-754 binary64 (single-precision literals are widened).
    Float,
    /// 1-based index into the string table.
    String,
    /// 0-based position of the target instruction in the same method.
    Target,
    /// 1-based index into the blob table; the blob holds i32 positions.
    Targets,
    /// Packed reference word (namespace, declaring type, member name).
    Member,
    /// Slot index of a local or argument.
    Variable,
    /// Call-site signature. The disassembler hands these over as opaque
    /// values, so no export can contain one.
    Signature,
}

macro_rules! opcodes {
    ($($variant:ident = $mnemonic:literal => $kind:ident,)*) => {
        /// Opcode, numbered by its position in the disassembler's opcode enumeration.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Deserialize)]
        #[serde(try_from = "String")]
        #[repr(u8)]
        pub enum Code {
            $($variant,)*
        }

        impl Code {
            /// Every opcode, indexed by its byte value.
            pub const ALL: &'static [Code] = &[$(Code::$variant,)*];

            /// Assembler mnemonic (e.g. `ldc.i4.s`).
            pub fn mnemonic(self) -> &'static str {
                match self {
                    $(Code::$variant => $mnemonic,)*
                }
            }

            /// Operand kind expected for this opcode.
            pub fn operand_kind(self) -> OperandKind {
                match self {
                    $(Code::$variant => OperandKind::$kind,)*
                }
            }
        }
    };
}

opcodes! {
    Nop = "nop" => None,
    Break = "break" => None,
    Ldarg0 = "ldarg.0" => None,
    Ldarg1 = "ldarg.1" => None,
    Ldarg2 = "ldarg.2" => None,
    Ldarg3 = "ldarg.3" => None,
    Ldloc0 = "ldloc.0" => None,
    Ldloc1 = "ldloc.1" => None,
    Ldloc2 = "ldloc.2" => None,
    Ldloc3 = "ldloc.3" => None,
    Stloc0 = "stloc.0" => None,
    Stloc1 = "stloc.1" => None,
    Stloc2 = "stloc.2" => None,
    Stloc3 = "stloc.3" => None,
    LdargS = "ldarg.s" => Variable,
    LdargaS = "ldarga.s" => Variable,
    StargS = "starg.s" => Variable,
    LdlocS = "ldloc.s" => Variable,
    LdlocaS = "ldloca.s" => Variable,
    StlocS = "stloc.s" => Variable,
    Ldnull = "ldnull" => None,
    LdcI4M1 = "ldc.i4.m1" => None,
    LdcI4_0 = "ldc.i4.0" => None,
    LdcI4_1 = "ldc.i4.1" => None,
    LdcI4_2 = "ldc.i4.2" => None,
    LdcI4_3 = "ldc.i4.3" => None,
    LdcI4_4 = "ldc.i4.4" => None,
    LdcI4_5 = "ldc.i4.5" => None,
    LdcI4_6 = "ldc.i4.6" => None,
    LdcI4_7 = "ldc.i4.7" => None,
    LdcI4_8 = "ldc.i4.8" => None,
    LdcI4S = "ldc.i4.s" => Integer,
    LdcI4 = "ldc.i4" => Integer,
    LdcI8 = "ldc.i8" => Integer,
    LdcR4 = "ldc.r4" => Float,
    LdcR8 = "ldc.r8" => Float,
    Dup = "dup" => None,
    Pop = "pop" => None,
    Jmp = "jmp" => Member,
    Call = "call" => Member,
    Calli = "calli" => Signature,
    Ret = "ret" => None,
    BrS = "br.s" => Target,
    BrfalseS = "brfalse.s" => Target,
    BrtrueS = "brtrue.s" => Target,
    BeqS = "beq.s" => Target,
    BgeS = "bge.s" => Target,
    BgtS = "bgt.s" => Target,
    BleS = "ble.s" => Target,
    BltS = "blt.s" => Target,
    BneUnS = "bne.un.s" => Target,
    BgeUnS = "bge.un.s" => Target,
    BgtUnS = "bgt.un.s" => Target,
    BleUnS = "ble.un.s" => Target,
    BltUnS = "blt.un.s" => Target,
    Br = "br" => Target,
    Brfalse = "brfalse" => Target,
    Brtrue = "brtrue" => Target,
    Beq = "beq" => Target,
    Bge = "bge" => Target,
    Bgt = "bgt" => Target,
    Ble = "ble" => Target,
    Blt = "blt" => Target,
    BneUn = "bne.un" => Target,
    BgeUn = "bge.un" => Target,
    BgtUn = "bgt.un" => Target,
    BleUn = "ble.un" => Target,
    BltUn = "blt.un" => Target,
    Switch = "switch" => Targets,
    LdindI1 = "ldind.i1" => None,
    LdindU1 = "ldind.u1" => None,
    LdindI2 = "ldind.i2" => None,
    LdindU2 = "ldind.u2" => None,
    LdindI4 = "ldind.i4" => None,
    LdindU4 = "ldind.u4" => None,
    LdindI8 = "ldind.i8" => None,
    LdindI = "ldind.i" => None,
    LdindR4 = "ldind.r4" => None,
    LdindR8 = "ldind.r8" => None,
    LdindRef = "ldind.ref" => None,
    StindRef = "stind.ref" => None,
    StindI1 = "stind.i1" => None,
    StindI2 = "stind.i2" => None,
    StindI4 = "stind.i4" => None,
    StindI8 = "stind.i8" => None,
    StindR4 = "stind.r4" => None,
    StindR8 = "stind.r8" => None,
    Add = "add" => None,
    Sub = "sub" => None,
    Mul = "mul" => None,
    Div = "div" => None,
    DivUn = "div.un" => None,
    Rem = "rem" => None,
    RemUn = "rem.un" => None,
    And = "and" => None,
    Or = "or" => None,
    Xor = "xor" => None,
    Shl = "shl" => None,
    Shr = "shr" => None,
    ShrUn = "shr.un" => None,
    Neg = "neg" => None,
    Not = "not" => None,
    ConvI1 = "conv.i1" => None,
    ConvI2 = "conv.i2" => None,
    ConvI4 = "conv.i4" => None,
    ConvI8 = "conv.i8" => None,
    ConvR4 = "conv.r4" => None,
    ConvR8 = "conv.r8" => None,
    ConvU4 = "conv.u4" => None,
    ConvU8 = "conv.u8" => None,
    Callvirt = "callvirt" => Member,
    Cpobj = "cpobj" => Member,
    Ldobj = "ldobj" => Member,
    Ldstr = "ldstr" => String,
    Newobj = "newobj" => Member,
    Castclass = "castclass" => Member,
    Isinst = "isinst" => Member,
    ConvRUn = "conv.r.un" => None,
    Unbox = "unbox" => Member,
    Throw = "throw" => None,
    Ldfld = "ldfld" => Member,
    Ldflda = "ldflda" => Member,
    Stfld = "stfld" => Member,
    Ldsfld = "ldsfld" => Member,
    Ldsflda = "ldsflda" => Member,
    Stsfld = "stsfld" => Member,
    Stobj = "stobj" => Member,
    ConvOvfI1Un = "conv.ovf.i1.un" => None,
    ConvOvfI2Un = "conv.ovf.i2.un" => None,
    ConvOvfI4Un = "conv.ovf.i4.un" => None,
    ConvOvfI8Un = "conv.ovf.i8.un" => None,
    ConvOvfU1Un = "conv.ovf.u1.un" => None,
    ConvOvfU2Un = "conv.ovf.u2.un" => None,
    ConvOvfU4Un = "conv.ovf.u4.un" => None,
    ConvOvfU8Un = "conv.ovf.u8.un" => None,
    ConvOvfIUn = "conv.ovf.i.un" => None,
    ConvOvfUUn = "conv.ovf.u.un" => None,
    Box = "box" => Member,
    Newarr = "newarr" => Member,
    Ldlen = "ldlen" => None,
    Ldelema = "ldelema" => Member,
    LdelemI1 = "ldelem.i1" => None,
    LdelemU1 = "ldelem.u1" => None,
    LdelemI2 = "ldelem.i2" => None,
    LdelemU2 = "ldelem.u2" => None,
    LdelemI4 = "ldelem.i4" => None,
    LdelemU4 = "ldelem.u4" => None,
    LdelemI8 = "ldelem.i8" => None,
    LdelemI = "ldelem.i" => None,
    LdelemR4 = "ldelem.r4" => None,
    LdelemR8 = "ldelem.r8" => None,
    LdelemRef = "ldelem.ref" => None,
    StelemI = "stelem.i" => None,
    StelemI1 = "stelem.i1" => None,
    StelemI2 = "stelem.i2" => None,
    StelemI4 = "stelem.i4" => None,
    StelemI8 = "stelem.i8" => None,
    StelemR4 = "stelem.r4" => None,
    StelemR8 = "stelem.r8" => None,
    StelemRef = "stelem.ref" => None,
    LdelemAny = "ldelem.any" => Member,
    StelemAny = "stelem.any" => Member,
    UnboxAny = "unbox.any" => Member,
    ConvOvfI1 = "conv.ovf.i1" => None,
    ConvOvfU1 = "conv.ovf.u1" => None,
    ConvOvfI2 = "conv.ovf.i2" => None,
    ConvOvfU2 = "conv.ovf.u2" => None,
    ConvOvfI4 = "conv.ovf.i4" => None,
    ConvOvfU4 = "conv.ovf.u4" => None,
    ConvOvfI8 = "conv.ovf.i8" => None,
    ConvOvfU8 = "conv.ovf.u8" => None,
    Refanyval = "refanyval" => Member,
    Ckfinite = "ckfinite" => None,
    Mkrefany = "mkrefany" => Member,
    Ldtoken = "ldtoken" => Member,
    ConvU2 = "conv.u2" => None,
    ConvU1 = "conv.u1" => None,
    ConvI = "conv.i" => None,
    ConvOvfI = "conv.ovf.i" => None,
    ConvOvfU = "conv.ovf.u" => None,
    AddOvf = "add.ovf" => None,
    AddOvfUn = "add.ovf.un" => None,
    MulOvf = "mul.ovf" => None,
    MulOvfUn = "mul.ovf.un" => None,
    SubOvf = "sub.ovf" => None,
    SubOvfUn = "sub.ovf.un" => None,
    Endfinally = "endfinally" => None,
    Leave = "leave" => Target,
    LeaveS = "leave.s" => Target,
    StindI = "stind.i" => None,
    ConvU = "conv.u" => None,
    Arglist = "arglist" => None,
    Ceq = "ceq" => None,
    Cgt = "cgt" => None,
    CgtUn = "cgt.un" => None,
    Clt = "clt" => None,
    CltUn = "clt.un" => None,
    Ldftn = "ldftn" => Member,
    Ldvirtftn = "ldvirtftn" => Member,
    Ldarg = "ldarg" => Variable,
    Ldarga = "ldarga" => Variable,
    Starg = "starg" => Variable,
    Ldloc = "ldloc" => Variable,
    Ldloca = "ldloca" => Variable,
    Stloc = "stloc" => Variable,
    Localloc = "localloc" => None,
    Endfilter = "endfilter" => None,
    Unaligned = "unaligned." => Integer,
    Volatile = "volatile." => None,
    Tail = "tail." => None,
    Initobj = "initobj" => Member,
    Constrained = "constrained." => Member,
    Cpblk = "cpblk" => None,
    Initblk = "initblk" => None,
    No = "no." => Integer,
    Rethrow = "rethrow" => None,
    Sizeof = "sizeof" => Member,
    Refanytype = "refanytype" => None,
    Readonly = "readonly." => None,
}

static MNEMONICS: OnceLock<HashMap<&'static str, Code>> = OnceLock::new();

impl Code {
    /// Decode an opcode byte. Returns `None` past the end of the table.
    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    /// Opcode byte as written to the stream.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Look up an opcode by mnemonic (`"ldc.i4.s"`).
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        MNEMONICS
            .get_or_init(|| Self::ALL.iter().map(|&c| (c.mnemonic(), c)).collect())
            .get(mnemonic)
            .copied()
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl TryFrom<String> for Code {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_mnemonic(&value).ok_or_else(|| format!("unknown opcode mnemonic: {value}"))
    }
}
