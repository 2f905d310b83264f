use std::path::{Path, PathBuf};

pub fn read_folder(folder_path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            files.extend(read_folder(&path)?);
        }
    }

    files.sort();

    Ok(files)
}

/// The JSON files of a folder and its subfolders, sorted.
pub fn read_json_files(folder_path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = read_folder(folder_path)?;
    files.retain(|path| path.extension().map(|ext| ext == "json").unwrap_or(false));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_read_folder() {
        let current_dir = env::current_dir().unwrap();
        let folder_path = current_dir.join("tests/fixtures/routes");
        let files = read_folder(&folder_path).unwrap();

        assert_eq!(
            files,
            vec![
                current_dir.join("tests/fixtures/routes/l_shaped.json"),
                current_dir.join("tests/fixtures/routes/notes.txt"),
                current_dir.join("tests/fixtures/routes/vias/two_vias.json"),
            ]
        );
    }

    #[test]
    fn test_read_json_files() {
        let current_dir = env::current_dir().unwrap();
        let files = read_json_files(&current_dir.join("tests/fixtures/routes")).unwrap();

        assert_eq!(
            files,
            vec![
                current_dir.join("tests/fixtures/routes/l_shaped.json"),
                current_dir.join("tests/fixtures/routes/vias/two_vias.json"),
            ]
        );
    }
}
