use rv32mc_core::isa::rv32i::funct3::*;
use rv32mc_core::isa::rv32i::opcodes::*;

/// Fluent encoder for RV32I instruction words.
///
/// Register arguments are indices; immediates are byte offsets or values as
/// an assembler would take them. `lui`/`auipc` take the 20-bit upper
/// immediate unshifted.
pub struct InstructionBuilder {
    opcode: u32,
    rd: u32,
    funct3: u32,
    rs1: u32,
    rs2: u32,
    funct7: u32,
    imm: i32,
}

impl Default for InstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self {
            opcode: 0,
            rd: 0,
            funct3: 0,
            rs1: 0,
            rs2: 0,
            funct7: 0,
            imm: 0,
        }
    }

    pub fn opcode(mut self, op: u32) -> Self {
        self.opcode = op;
        self
    }

    pub fn rd(mut self, rd: u32) -> Self {
        self.rd = rd;
        self
    }

    pub fn rs1(mut self, rs1: u32) -> Self {
        self.rs1 = rs1;
        self
    }

    pub fn rs2(mut self, rs2: u32) -> Self {
        self.rs2 = rs2;
        self
    }

    pub fn funct3(mut self, funct3: u32) -> Self {
        self.funct3 = funct3;
        self
    }

    pub fn funct7(mut self, funct7: u32) -> Self {
        self.funct7 = funct7;
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    fn r(mut self, funct3: u32, funct7: u32, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.opcode = OP_REG;
        self.funct3 = funct3;
        self.funct7 = funct7;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self
    }

    fn i(mut self, opcode: u32, funct3: u32, rd: u32, rs1: u32, imm: i32) -> Self {
        self.opcode = opcode;
        self.funct3 = funct3;
        self.rd = rd;
        self.rs1 = rs1;
        self.imm = imm;
        self
    }

    fn s(mut self, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.opcode = OP_STORE;
        self.funct3 = funct3;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.imm = imm;
        self
    }

    fn b(mut self, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.opcode = OP_BRANCH;
        self.funct3 = funct3;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.imm = imm;
        self
    }

    // R-type

    pub fn add(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(ADD_SUB, 0b0000000, rd, rs1, rs2)
    }

    pub fn sub(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(ADD_SUB, 0b0100000, rd, rs1, rs2)
    }

    pub fn sll(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(SLL, 0b0000000, rd, rs1, rs2)
    }

    pub fn slt(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(SLT, 0b0000000, rd, rs1, rs2)
    }

    pub fn sltu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(SLTU, 0b0000000, rd, rs1, rs2)
    }

    pub fn xor(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(XOR, 0b0000000, rd, rs1, rs2)
    }

    pub fn srl(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(SRL_SRA, 0b0000000, rd, rs1, rs2)
    }

    pub fn sra(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(SRL_SRA, 0b0100000, rd, rs1, rs2)
    }

    pub fn or(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(OR, 0b0000000, rd, rs1, rs2)
    }

    pub fn and(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(AND, 0b0000000, rd, rs1, rs2)
    }

    // I-type ALU

    pub fn addi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, ADD_SUB, rd, rs1, imm)
    }

    pub fn slti(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, SLT, rd, rs1, imm)
    }

    pub fn sltiu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, SLTU, rd, rs1, imm)
    }

    pub fn xori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, XOR, rd, rs1, imm)
    }

    pub fn ori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, OR, rd, rs1, imm)
    }

    pub fn andi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, AND, rd, rs1, imm)
    }

    pub fn slli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i(OP_IMM, SLL, rd, rs1, (shamt & 0x1F) as i32)
    }

    pub fn srli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i(OP_IMM, SRL_SRA, rd, rs1, (shamt & 0x1F) as i32)
    }

    pub fn srai(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i(OP_IMM, SRL_SRA, rd, rs1, 0x400 | (shamt & 0x1F) as i32)
    }

    // Loads and stores

    pub fn lb(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, LB, rd, rs1, imm)
    }

    pub fn lh(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, LH, rd, rs1, imm)
    }

    pub fn lw(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, LW, rd, rs1, imm)
    }

    pub fn lbu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, LBU, rd, rs1, imm)
    }

    pub fn lhu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, LHU, rd, rs1, imm)
    }

    pub fn sb(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s(SB, rs1, rs2, imm)
    }

    pub fn sh(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s(SH, rs1, rs2, imm)
    }

    pub fn sw(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s(SW, rs1, rs2, imm)
    }

    // Branches

    pub fn beq(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(BEQ, rs1, rs2, imm)
    }

    pub fn bne(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(BNE, rs1, rs2, imm)
    }

    pub fn blt(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(BLT, rs1, rs2, imm)
    }

    pub fn bge(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(BGE, rs1, rs2, imm)
    }

    pub fn bltu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(BLTU, rs1, rs2, imm)
    }

    pub fn bgeu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(BGEU, rs1, rs2, imm)
    }

    // Jumps and upper immediates

    pub fn jal(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_JAL;
        self.rd = rd;
        self.imm = imm;
        self
    }

    pub fn jalr(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_JALR, JALR, rd, rs1, imm)
    }

    pub fn lui(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_LUI;
        self.rd = rd;
        self.imm = imm;
        self
    }

    pub fn auipc(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_AUIPC;
        self.rd = rd;
        self.imm = imm;
        self
    }

    // Inert

    pub fn fence(self) -> Self {
        self.i(OP_MISC_MEM, FENCE, 0, 0, 0x0FF)
    }

    pub fn ecall(self) -> Self {
        self.i(OP_SYSTEM, 0, 0, 0, 0)
    }

    pub fn ebreak(self) -> Self {
        self.i(OP_SYSTEM, 0, 0, 0, 1)
    }

    /// NOP is ADDI x0, x0, 0
    pub fn nop(self) -> Self {
        self.addi(0, 0, 0)
    }

    /// `j .`: the self-loop that halts a simulator run.
    pub fn halt(self) -> Self {
        self.jal(0, 0)
    }

    pub fn build(self) -> u32 {
        let opcode = self.opcode & 0x7F;
        let rd = (self.rd & 0x1F) << 7;
        let funct3 = (self.funct3 & 0x7) << 12;
        let rs1 = (self.rs1 & 0x1F) << 15;
        let rs2 = (self.rs2 & 0x1F) << 20;
        let funct7 = (self.funct7 & 0x7F) << 25;

        match opcode {
            OP_REG => {
                // R-type: funct7 | rs2 | rs1 | funct3 | rd | opcode
                funct7 | rs2 | rs1 | funct3 | rd | opcode
            }
            OP_IMM | OP_LOAD | OP_JALR | OP_MISC_MEM | OP_SYSTEM => {
                // I-type: imm[11:0] | rs1 | funct3 | rd | opcode
                let imm_val = (self.imm as u32) & 0xFFF;
                (imm_val << 20) | rs1 | funct3 | rd | opcode
            }
            OP_STORE => {
                // S-type: imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode
                let imm_val = self.imm as u32;
                let imm_11_5 = ((imm_val >> 5) & 0x7F) << 25;
                let imm_4_0 = (imm_val & 0x1F) << 7;
                imm_11_5 | rs2 | rs1 | funct3 | imm_4_0 | opcode
            }
            OP_BRANCH => {
                // B-type: imm[12|10:5] | rs2 | rs1 | funct3 | imm[4:1|11] | opcode
                let imm_val = self.imm as u32;
                let bit_12 = ((imm_val >> 12) & 0x1) << 31;
                let bits_10_5 = ((imm_val >> 5) & 0x3F) << 25;
                let bits_4_1 = ((imm_val >> 1) & 0xF) << 8;
                let bit_11 = ((imm_val >> 11) & 0x1) << 7;
                bit_12 | bits_10_5 | rs2 | rs1 | funct3 | bits_4_1 | bit_11 | opcode
            }
            OP_LUI | OP_AUIPC => {
                // U-type: imm[31:12] | rd | opcode
                let imm_val = (self.imm as u32) & 0xFFFFF;
                (imm_val << 12) | rd | opcode
            }
            OP_JAL => {
                // J-type: imm[20|10:1|11|19:12] | rd | opcode
                let imm_val = self.imm as u32;
                let bit_20 = ((imm_val >> 20) & 0x1) << 31;
                let bits_10_1 = ((imm_val >> 1) & 0x3FF) << 21;
                let bit_11 = ((imm_val >> 11) & 0x1) << 20;
                let bits_19_12 = ((imm_val >> 12) & 0xFF) << 12;
                bit_20 | bits_10_1 | bit_11 | bits_19_12 | rd | opcode
            }
            _ => opcode | rd | funct3 | rs1 | rs2 | funct7,
        }
    }
}

/// Shorthand for `InstructionBuilder::new()`.
pub fn inst() -> InstructionBuilder {
    InstructionBuilder::new()
}

/// Encodes a program as little-endian bytes.
pub fn to_bytes(program: &[u32]) -> Vec<u8> {
    program.iter().flat_map(|w| w.to_le_bytes()).collect()
}
