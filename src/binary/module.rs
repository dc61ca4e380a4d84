use super::{
    leb128,
    opcode::Opcode,
    section::{self, SectionCode},
    types::{Export, ExportDesc, FuncType, FunctionLocal, ModuleFunction, ValueType},
};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];
const FUNC_TYPE_TAG: u8 = 0x60;
const EXPORT_KIND_FUNC: u8 = 0x00;
// One linear memory with a min-only limit of 1 page. The subset never
// varies this, so it stays a byte template instead of a memory type.
const MEMORY_SECTION: [u8; 5] = [0x05, 0x03, 0x01, 0x00, 0x01];

/// The ordered function list a module is assembled from. A function's
/// index is its position here, shared by the function, export, and code
/// sections.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleDefinition {
    pub functions: Vec<ModuleFunction>,
}

impl ModuleDefinition {
    pub fn new(functions: Vec<ModuleFunction>) -> Self {
        Self { functions }
    }

    /// Assemble the complete binary module: magic, version, then the
    /// type, function, memory, export, and code sections in that order,
    /// all present even when empty. Fails without producing any buffer.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let (func_types, type_indices) = assign_type_indices(&self.functions)?;
        let exports = collect_exports(&self.functions)?;

        let mut module = vec![];
        module.extend_from_slice(&MAGIC);
        module.extend_from_slice(&VERSION);
        module.extend(section::frame(
            SectionCode::Type,
            &encode_vector(&func_types, encode_func_type)?,
        )?);
        module.extend(section::frame(
            SectionCode::Function,
            &encode_vector(&type_indices, |(_, type_idx)| {
                Ok(leb128::encode_unsigned(*type_idx))
            })?,
        )?);
        module.extend_from_slice(&MEMORY_SECTION);
        module.extend(section::frame(
            SectionCode::Export,
            &encode_vector(&exports, encode_export)?,
        )?);
        module.extend(section::frame(
            SectionCode::Code,
            &encode_vector(&self.functions, encode_code_entry)?,
        )?);
        Ok(module)
    }
}

/// Deduplicate signatures into the type table, first-occurrence order.
/// Returns the table and one `(function index, type index)` pair per
/// function, so the pairing survives any later filtering.
fn assign_type_indices(functions: &[ModuleFunction]) -> Result<(Vec<FuncType>, Vec<(u32, u32)>)> {
    let mut func_types: Vec<FuncType> = vec![];
    let mut type_indices = vec![];

    for (func_idx, func) in functions.iter().enumerate() {
        let func_idx = u32::try_from(func_idx)
            .with_context(|| format!("index of function `{}` exceeds the u32 range", func.name))?;
        let signature = func.func_type();
        let type_idx = match func_types.iter().position(|t| *t == signature) {
            Some(existing) => existing,
            None => {
                func_types.push(signature);
                func_types.len() - 1
            }
        };
        let type_idx = u32::try_from(type_idx)
            .with_context(|| format!("type index of function `{}` exceeds the u32 range", func.name))?;
        type_indices.push((func_idx, type_idx));
    }

    Ok((func_types, type_indices))
}

/// Exported functions in declaration order, each carrying its original
/// function index.
fn collect_exports(functions: &[ModuleFunction]) -> Result<Vec<Export>> {
    let mut exports = vec![];

    for (func_idx, func) in functions.iter().enumerate() {
        if !func.export {
            continue;
        }
        let func_idx = u32::try_from(func_idx)
            .with_context(|| format!("index of function `{}` exceeds the u32 range", func.name))?;
        exports.push(Export {
            name: func.name.clone(),
            desc: ExportDesc::Func(func_idx),
        });
    }

    Ok(exports)
}

/// A count-prefixed vector: ULEB128 item count, then each item's bytes.
fn encode_vector<T>(items: &[T], encode_item: impl Fn(&T) -> Result<Vec<u8>>) -> Result<Vec<u8>> {
    let count = u32::try_from(items.len()).context("vector item count exceeds the u32 range")?;
    let mut bytes = leb128::encode_unsigned(count);
    for item in items {
        bytes.extend(encode_item(item)?);
    }
    Ok(bytes)
}

fn encode_func_type(func_type: &FuncType) -> Result<Vec<u8>> {
    let result: Vec<ValueType> = func_type.result.into_iter().collect();
    let mut bytes = vec![FUNC_TYPE_TAG];
    bytes.extend(encode_vector(&func_type.params, |ty| Ok(vec![u8::from(*ty)]))?);
    bytes.extend(encode_vector(&result, |ty| Ok(vec![u8::from(*ty)]))?);
    Ok(bytes)
}

fn encode_name(name: &str) -> Result<Vec<u8>> {
    let len = u32::try_from(name.len())
        .with_context(|| format!("length of name `{}` exceeds the u32 range", name))?;
    let mut bytes = leb128::encode_unsigned(len);
    bytes.extend_from_slice(name.as_bytes());
    Ok(bytes)
}

fn encode_export(export: &Export) -> Result<Vec<u8>> {
    let ExportDesc::Func(func_idx) = export.desc;
    let mut bytes = encode_name(&export.name)?;
    bytes.push(EXPORT_KIND_FUNC);
    bytes.extend(leb128::encode_unsigned(func_idx));
    Ok(bytes)
}

fn encode_local(local: &FunctionLocal) -> Result<Vec<u8>> {
    let mut bytes = leb128::encode_unsigned(local.type_count);
    bytes.push(local.value_type.into());
    Ok(bytes)
}

/// One code-section entry: locals vector, instruction bytes, the `end`
/// terminator, the whole body length-prefixed.
fn encode_code_entry(func: &ModuleFunction) -> Result<Vec<u8>> {
    let mut body = encode_vector(&func.locals, encode_local)?;
    for instruction in &func.code {
        body.push(instruction.byte());
    }
    body.push(Opcode::End.into());

    let len = u32::try_from(body.len())
        .with_context(|| format!("body of function `{}` exceeds the u32 size range", func.name))?;
    let mut entry = leb128::encode_unsigned(len);
    entry.extend(body);
    Ok(entry)
}
