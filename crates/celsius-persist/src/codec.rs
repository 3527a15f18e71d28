//! Binary encode/decode of [`MapThermalState`].
//!
//! All integers are little-endian and strings are prefixed with a `u32`
//! byte length. There is no compression and no padding.

use std::io::{self, Read, Write};

use celsius_core::{MapThermalState, TerrainId, TerrainRegistry};
use celsius_space::MapGrid;

use crate::error::PersistError;
use crate::{FORMAT_VERSION, MAGIC};

/// Longest terrain name accepted when decoding.
const MAX_NAME_LEN: usize = 1024;

// ── Primitive writers ───────────────────────────────────────────

fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), PersistError> {
    w.write_all(&[v])?;
    Ok(())
}

fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), PersistError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_str(w: &mut dyn Write, s: &str) -> Result<(), PersistError> {
    let len = u32::try_from(s.len()).map_err(|_| PersistError::Malformed {
        detail: format!("terrain name of {} bytes is too long", s.len()),
    })?;
    write_u32_le(w, len)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

/// Write every value as its raw bits.
fn write_f32_bits(w: &mut dyn Write, values: &[f32]) -> Result<(), PersistError> {
    let mut buf = Vec::with_capacity(values.len() * 4);
    for v in values {
        buf.extend_from_slice(&v.to_bits().to_le_bytes());
    }
    w.write_all(&buf)?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

fn read_u8(r: &mut dyn Read) -> Result<u8, PersistError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u32_le(r: &mut dyn Read) -> Result<u32, PersistError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_str(r: &mut dyn Read) -> Result<String, PersistError> {
    let len = read_u32_le(r)? as usize;
    if len > MAX_NAME_LEN {
        return Err(PersistError::Malformed {
            detail: format!("terrain name length {len} exceeds {MAX_NAME_LEN}"),
        });
    }
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| PersistError::Malformed {
        detail: format!("invalid UTF-8 terrain name: {e}"),
    })
}

/// Reads `count` floats without trusting `count` for the allocation: the
/// buffer only grows as bytes arrive, so a short input fails with EOF.
fn read_f32_bits(r: &mut dyn Read, count: usize) -> Result<Vec<f32>, PersistError> {
    let expected = count as u64 * 4;
    let mut buf = Vec::new();
    Read::take(&mut *r, expected).read_to_end(&mut buf)?;
    if (buf.len() as u64) < expected {
        return Err(PersistError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {expected} bytes of temperatures, found {}", buf.len()),
        )));
    }
    Ok(buf
        .chunks_exact(4)
        .map(|b| f32::from_bits(u32::from_le_bytes([b[0], b[1], b[2], b[3]])))
        .collect())
}

// ── State encode/decode ─────────────────────────────────────────

/// Encode `state`, writing under-terrain entries by their name in
/// `terrains`.
///
/// Fails with [`PersistError::Malformed`] if the state is inconsistent
/// and [`PersistError::UnknownTerrain`] if an entry's id is not in
/// `terrains`.
pub fn encode_state(
    w: &mut dyn Write,
    state: &MapThermalState,
    terrains: &TerrainRegistry,
) -> Result<(), PersistError> {
    if !state.is_consistent() {
        return Err(PersistError::Malformed {
            detail: format!(
                "state arrays do not describe a {}x{} grid",
                state.width, state.height
            ),
        });
    }
    // Resolve names before writing anything.
    let names = state
        .under_terrain
        .iter()
        .map(|&(cell, id)| {
            terrains
                .name_of(id)
                .map(|name| (cell, name))
                .ok_or_else(|| PersistError::UnknownTerrain {
                    name: format!("#{id}"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_u32_le(w, state.width)?;
    write_u32_le(w, state.height)?;
    write_f32_bits(w, &state.temperatures)?;

    match &state.terrain_temperatures {
        Some(values) => {
            write_u8(w, 1)?;
            write_f32_bits(w, values)?;
        }
        None => write_u8(w, 0)?,
    }

    write_u32_le(w, names.len() as u32)?;
    for (cell, name) in names {
        write_u32_le(w, cell)?;
        write_str(w, name)?;
    }
    Ok(())
}

/// Decode a state written by [`encode_state`], resolving terrain names
/// against `terrains`.
///
/// The registry may differ from the one used to save, as long as every
/// saved name is still registered.
pub fn decode_state(
    r: &mut dyn Read,
    terrains: &TerrainRegistry,
) -> Result<MapThermalState, PersistError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(PersistError::InvalidMagic);
    }
    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion { found: version });
    }

    let width = read_u32_le(r)?;
    let height = read_u32_le(r)?;
    let grid = MapGrid::new(width, height).map_err(|e| PersistError::Malformed {
        detail: format!("bad grid size: {e}"),
    })?;
    let n = grid.cell_count();

    let temperatures = read_f32_bits(r, n)?;
    let terrain_temperatures = match read_u8(r)? {
        0 => None,
        1 => Some(read_f32_bits(r, n)?),
        flag => {
            return Err(PersistError::Malformed {
                detail: format!("invalid terrain temperature flag: {flag}"),
            })
        }
    };

    let count = read_u32_le(r)? as usize;
    if count > n {
        return Err(PersistError::Malformed {
            detail: format!("{count} under-terrain entries for {n} cells"),
        });
    }
    let mut under_terrain: Vec<(u32, TerrainId)> = Vec::new();
    for _ in 0..count {
        let cell = read_u32_le(r)?;
        let name = read_str(r)?;
        let id = terrains
            .id_of(&name)
            .ok_or(PersistError::UnknownTerrain { name })?;
        under_terrain.push((cell, id));
    }

    let state = MapThermalState {
        width,
        height,
        temperatures,
        terrain_temperatures,
        under_terrain,
    };
    if !state.is_consistent() {
        return Err(PersistError::Malformed {
            detail: "under-terrain entries are unsorted, duplicated or out of range".into(),
        });
    }
    log::debug!("decoded {width}x{height} thermal state with {count} frozen cells");
    Ok(state)
}

/// Check that `state` fits a map of `width x height`.
pub fn check_dimensions(
    state: &MapThermalState,
    width: u32,
    height: u32,
) -> Result<(), PersistError> {
    if (state.width, state.height) != (width, height) {
        return Err(PersistError::DimensionMismatch {
            expected: (width, height),
            found: (state.width, state.height),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use celsius_core::terrain::names;
    use celsius_core::TerrainDef;
    use std::io::Cursor;

    fn registry() -> TerrainRegistry {
        TerrainRegistry::with_defaults()
    }

    fn sample(terrains: &TerrainRegistry) -> MapThermalState {
        let shallow = terrains.id_of(names::WATER_SHALLOW).unwrap();
        let deep = terrains.id_of(names::WATER_DEEP).unwrap();
        MapThermalState {
            width: 3,
            height: 2,
            temperatures: vec![21.0, -4.5, 0.0, -0.0, 1e-30, 1234.5],
            terrain_temperatures: Some(vec![
                f32::NAN,
                f32::from_bits(0x7fc0_0001),
                2.0,
                f32::NAN,
                f32::INFINITY,
                -3.0,
            ]),
            under_terrain: vec![(1, shallow), (4, deep)],
        }
    }

    fn encode(state: &MapThermalState, terrains: &TerrainRegistry) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_state(&mut buf, state, terrains).unwrap();
        buf
    }

    #[test]
    fn round_trip_is_bit_identical() {
        let terrains = registry();
        let state = sample(&terrains);
        let buf = encode(&state, &terrains);
        let back = decode_state(&mut Cursor::new(buf), &terrains).unwrap();
        assert!(back.bit_identical(&state));
        let payload = back.terrain_temperatures.unwrap()[1].to_bits();
        assert_eq!(payload, 0x7fc0_0001);
    }

    #[test]
    fn round_trip_without_terrain_temperatures() {
        let terrains = registry();
        let state = MapThermalState {
            terrain_temperatures: None,
            under_terrain: Vec::new(),
            ..sample(&terrains)
        };
        let buf = encode(&state, &terrains);
        let back = decode_state(&mut Cursor::new(buf), &terrains).unwrap();
        assert!(back.bit_identical(&state));
    }

    #[test]
    fn header_layout() {
        let terrains = registry();
        let buf = encode(&sample(&terrains), &terrains);
        assert_eq!(&buf[..4], b"CELS");
        assert_eq!(buf[4], FORMAT_VERSION);
        assert_eq!(&buf[5..9], &3u32.to_le_bytes());
        assert_eq!(&buf[9..13], &2u32.to_le_bytes());
        assert_eq!(&buf[13..17], &21.0f32.to_bits().to_le_bytes());
    }

    #[test]
    fn names_survive_a_rebuilt_registry() {
        let saved_with = registry();
        let buf = encode(&sample(&saved_with), &saved_with);

        let mut loaded_with = TerrainRegistry::new();
        loaded_with.register(TerrainDef::ground("Marsh", "marsh"));
        loaded_with.register(TerrainDef::water(names::WATER_DEEP, "deep water", true));
        loaded_with.register(TerrainDef::water(names::WATER_SHALLOW, "shallow water", false));

        let back = decode_state(&mut Cursor::new(buf), &loaded_with).unwrap();
        assert_eq!(
            back.under_terrain,
            vec![
                (1, loaded_with.id_of(names::WATER_SHALLOW).unwrap()),
                (4, loaded_with.id_of(names::WATER_DEEP).unwrap()),
            ]
        );
    }

    #[test]
    fn missing_terrain_on_load() {
        let terrains = registry();
        let buf = encode(&sample(&terrains), &terrains);
        let mut sparse = TerrainRegistry::new();
        sparse.register(TerrainDef::water(names::WATER_SHALLOW, "shallow water", false));
        match decode_state(&mut Cursor::new(buf), &sparse) {
            Err(PersistError::UnknownTerrain { name }) => assert_eq!(name, names::WATER_DEEP),
            other => panic!("expected UnknownTerrain, got {other:?}"),
        }
    }

    #[test]
    fn unregistered_id_on_save() {
        let terrains = registry();
        let mut state = sample(&terrains);
        state.under_terrain.push((5, TerrainId(999)));
        let mut buf = Vec::new();
        let err = encode_state(&mut buf, &state, &terrains).unwrap_err();
        assert!(matches!(err, PersistError::UnknownTerrain { .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn inconsistent_state_is_not_written() {
        let terrains = registry();
        let mut state = sample(&terrains);
        state.temperatures.pop();
        let mut buf = Vec::new();
        assert!(matches!(
            encode_state(&mut buf, &state, &terrains),
            Err(PersistError::Malformed { .. })
        ));
    }

    #[test]
    fn bad_magic() {
        let terrains = registry();
        let mut buf = encode(&sample(&terrains), &terrains);
        buf[0] = b'X';
        assert!(matches!(
            decode_state(&mut Cursor::new(buf), &terrains),
            Err(PersistError::InvalidMagic)
        ));
    }

    #[test]
    fn future_version() {
        let terrains = registry();
        let mut buf = encode(&sample(&terrains), &terrains);
        buf[4] = FORMAT_VERSION + 1;
        match decode_state(&mut Cursor::new(buf), &terrains) {
            Err(PersistError::UnsupportedVersion { found }) => {
                assert_eq!(found, FORMAT_VERSION + 1)
            }
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn truncated_blob_is_an_io_error() {
        let terrains = registry();
        let buf = encode(&sample(&terrains), &terrains);
        let cut = buf[..buf.len() - 3].to_vec();
        match decode_state(&mut Cursor::new(cut), &terrains) {
            Err(PersistError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn huge_header_without_payload_is_an_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC);
        buf.push(FORMAT_VERSION);
        buf.extend_from_slice(&MapGrid::MAX_DIM.to_le_bytes());
        buf.extend_from_slice(&MapGrid::MAX_DIM.to_le_bytes());
        buf.extend_from_slice(&[0u8; 10]);
        match decode_state(&mut Cursor::new(buf), &registry()) {
            Err(PersistError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn zero_sized_grid_is_malformed() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC);
        buf.push(FORMAT_VERSION);
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&4u32.to_le_bytes());
        assert!(matches!(
            decode_state(&mut Cursor::new(buf), &registry()),
            Err(PersistError::Malformed { .. })
        ));
    }

    #[test]
    fn bad_terrain_flag() {
        let terrains = registry();
        let mut buf = encode(&sample(&terrains), &terrains);
        // Header (13 bytes) plus six temperatures.
        buf[13 + 6 * 4] = 7;
        assert!(matches!(
            decode_state(&mut Cursor::new(buf), &terrains),
            Err(PersistError::Malformed { .. })
        ));
    }

    #[test]
    fn dimension_check() {
        let state = sample(&registry());
        assert!(check_dimensions(&state, 3, 2).is_ok());
        match check_dimensions(&state, 2, 3) {
            Err(PersistError::DimensionMismatch { expected, found }) => {
                assert_eq!(expected, (2, 3));
                assert_eq!(found, (3, 2));
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }
}
