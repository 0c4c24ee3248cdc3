// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DraftJson {
    #[serde(default)]
    regions: Vec<DraftRegionJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
enum DraftRegionJson {
    Text(String),
    Image(DraftImageJson),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DraftImageJson {
    width: u32,
    height: u32,
    bitmap: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
}

fn draft_to_json(regions: &[Region]) -> DraftJson {
    DraftJson {
        regions: regions
            .iter()
            .filter_map(|region| match region {
                Region::Text(text) => Some(DraftRegionJson::Text(text.clone())),
                Region::Image(image) => {
                    let bitmap = image.bitmap();
                    Some(DraftRegionJson::Image(DraftImageJson {
                        width: bitmap.width(),
                        height: bitmap.height(),
                        bitmap: BASE64.encode(bitmap.bytes()),
                        data: image.data().map(|data| BASE64.encode(data)),
                        content_type: image.content_type().map(str::to_owned),
                    }))
                }
                // Placeholders and spacers cannot be restored.
                Region::ImageUrl(_) | Region::Spacer | Region::Error(_) => None,
            })
            .collect(),
    }
}

fn draft_from_json(path: &Path, draft: DraftJson) -> Result<Vec<Region>, StoreError> {
    let mut regions = Vec::with_capacity(draft.regions.len());
    for region in draft.regions {
        match region {
            DraftRegionJson::Text(text) => regions.push(Region::Text(text)),
            DraftRegionJson::Image(image) => {
                let bytes = decode_base64(path, "bitmap", &image.bitmap)?;
                let bitmap = Bitmap::new(image.width, image.height, bytes);
                let data = image
                    .data
                    .as_deref()
                    .map(|data| decode_base64(path, "data", data).map(Arc::from))
                    .transpose()?;

                let mut image_region = ImageRegion::new(bitmap);
                image_region.set_data(data, image.content_type);
                regions.push(Region::Image(image_region));
            }
        }
    }
    Ok(normalize_regions(regions))
}

fn decode_base64(path: &Path, field: &'static str, value: &str) -> Result<Vec<u8>, StoreError> {
    BASE64.decode(value).map_err(|source| StoreError::Base64 {
        path: path.to_path_buf(),
        field,
        source,
    })
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_temp(
    tmp_path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: tmp_path.to_path_buf(),
        source,
    };

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)
        .map_err(io_err)?;
    file.write_all(contents).map_err(io_err)?;
    if durability == WriteDurability::Durable {
        file.sync_all().map_err(io_err)?;
    }
    Ok(())
}

fn write_atomic(
    root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    match fs::symlink_metadata(root) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: root.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(root).map_err(|source| StoreError::Io {
                path: root.to_path_buf(),
                source,
            })?;
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: root.to_path_buf(),
                source,
            })
        }
    }

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = root.join(format!(
        ".omnibar.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let written = write_temp(&tmp_path, contents, durability).and_then(|()| {
        rename_overwrite(&tmp_path, path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(root).map_err(|source| StoreError::Io {
                path: root.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: root.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
