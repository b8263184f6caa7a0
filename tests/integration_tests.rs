use anyhow::Ok;
use image::{ImageBuffer, Rgba};
use lsb_stash::{
    cli::{EmbedArgs, ExtractArgs},
    handler::{handle_embed, handle_extract},
};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 验证从嵌入到提取的完整流程
#[test]
fn test_handle_embed_and_extract_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let stego_image_path = dir.path().join("stego.png");
    let secret_file_path = dir.path().join("secret.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_content = "This is a test message for the handler! 这是一个给处理器的测试信息！";
    fs::write(&secret_file_path, original_content)?;

    // 2. 测试 handle_embed
    let embed_args = EmbedArgs {
        image: original_image_path.clone(),
        file: secret_file_path.clone(),
        dest: Some(stego_image_path.clone()),
        passcode: "integration-pass".to_string(),
        force: false,
    };
    handle_embed(embed_args)?;
    assert!(stego_image_path.exists(), "Stego image should be created.");

    // 3. 测试 handle_extract
    let extract_args = ExtractArgs {
        image: stego_image_path.clone(),
        output: Some(dir.path().to_path_buf()),
        passcode: "integration-pass".to_string(),
        force: false,
    };
    handle_extract(extract_args)?;

    // 4. 验证结果
    let recovered_path = dir.path().join("extracted_secret.txt");
    assert!(
        recovered_path.exists(),
        "Recovered file should be created."
    );
    let recovered_content = fs::read_to_string(&recovered_path)?;
    assert_eq!(
        original_content, recovered_content,
        "Recovered content must match the original."
    );

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_embed_and_extract_with_defaults() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let secret_file_path = dir.path().join("secret.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_content = "Testing default path generation. 测试默认路径生成。";
    fs::write(&secret_file_path, original_content)?;

    // 2. 测试 handle_embed，不提供 dest 路径
    let embed_args = EmbedArgs {
        image: original_image_path.clone(),
        file: secret_file_path.clone(),
        dest: None, // 关键：测试 None 的情况
        passcode: "default-pass".to_string(),
        force: false,
    };
    handle_embed(embed_args)?;

    // 验证默认的隐写图像文件是否已创建
    let expected_stego_path = dir.path().join("stego_original.png");
    assert!(
        expected_stego_path.exists(),
        "Default stego image should be created at: {:?}",
        expected_stego_path
    );

    // 3. 测试 handle_extract，不提供输出目录
    let extract_args = ExtractArgs {
        image: expected_stego_path, // 使用上一步生成的默认文件
        output: None,               // 关键：测试 None 的情况
        passcode: "default-pass".to_string(),
        force: false,
    };
    handle_extract(extract_args)?;

    // 验证恢复出的文件落在隐写图像所在目录
    let expected_recovered_path = dir.path().join("extracted_secret.txt");
    assert!(
        expected_recovered_path.exists(),
        "Default recovered file should be created at: {:?}",
        expected_recovered_path
    );

    // 4. 验证结果
    let recovered_content = fs::read_to_string(&expected_recovered_path)?;
    assert_eq!(
        original_content, recovered_content,
        "Recovered content from default path must match the original."
    );

    Ok(())
}

/// 验证嵌入的覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_embed_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let secret_path = dir.path().join("secret.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&secret_path, "some secret bytes")?;

    // 2. 场景一：测试覆盖保护
    // 先创建一个同名的目标文件，模拟“文件已存在”的场景
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    assert!(dest_path.exists());

    // 构建参数，不使用 --force
    let embed_args_no_force = EmbedArgs {
        image: image_path.clone(),
        file: secret_path.clone(),
        dest: Some(dest_path.clone()),
        passcode: "pass".to_string(),
        force: false,
    };

    // 执行并断言操作会失败
    let result = handle_embed(embed_args_no_force);
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    // 构建参数，这次使用 --force
    let embed_args_with_force = EmbedArgs {
        image: image_path.clone(),
        file: secret_path.clone(),
        dest: Some(dest_path.clone()),
        passcode: "pass".to_string(),
        force: true,
    };

    // 执行并断言操作会成功
    let result = handle_embed(embed_args_with_force);
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );

    // 验证文件确实被覆盖（内容不再是 "this is a dummy file..."）
    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证提取的覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_extract_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let secret_path = dir.path().join("secret.txt");
    let stego_path = dir.path().join("stego.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&secret_path, "recover me twice")?;

    let embed_args = EmbedArgs {
        image: image_path,
        file: secret_path,
        dest: Some(stego_path.clone()),
        passcode: "pass".to_string(),
        force: false,
    };
    handle_embed(embed_args)?;

    // 2. 第一次提取成功
    let extract_args = ExtractArgs {
        image: stego_path.clone(),
        output: Some(dir.path().to_path_buf()),
        passcode: "pass".to_string(),
        force: false,
    };
    handle_extract(extract_args)?;
    assert!(dir.path().join("extracted_secret.txt").exists());

    // 3. 第二次提取撞上已存在的文件
    let extract_args_no_force = ExtractArgs {
        image: stego_path.clone(),
        output: Some(dir.path().to_path_buf()),
        passcode: "pass".to_string(),
        force: false,
    };
    let result = handle_extract(extract_args_no_force);
    assert!(result.is_err(), "Second extraction should fail without --force.");
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("already exists"));
    }

    // 4. 使用 --force 后成功
    let extract_args_with_force = ExtractArgs {
        image: stego_path,
        output: Some(dir.path().to_path_buf()),
        passcode: "pass".to_string(),
        force: true,
    };
    let result = handle_extract(extract_args_with_force);
    assert!(
        result.is_ok(),
        "Extraction should succeed with --force when file exists."
    );

    Ok(())
}

/// 验证空间不足时的错误处理
#[test]
fn test_handle_embed_not_enough_space() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let secret_path = dir.path().join("large.txt");
    let dest_path = dir.path().join("dest.png");

    // 创建一个非常小的图片
    create_test_image(&image_path, 10, 10);
    // 创建一个放不下又不是图像的大文件
    let large_content = "a".repeat(5000);
    fs::write(&secret_path, large_content)?;

    // 2. 执行并断言错误
    let embed_args = EmbedArgs {
        image: image_path,
        file: secret_path,
        dest: Some(dest_path),
        passcode: "pass".to_string(),
        force: false,
    };
    let result = handle_embed(embed_args);

    assert!(result.is_err());
    if let Err(e) = result {
        // 根因在上下文链里
        assert!(format!("{e:#}").contains("the image holds only"));
    }

    Ok(())
}

/// 验证输出路径必须是无损图像格式
#[test]
fn test_handle_embed_rejects_lossy_dest() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let secret_path = dir.path().join("secret.txt");

    create_test_image(&image_path, 50, 50);
    fs::write(&secret_path, "lossy output would destroy me")?;

    let embed_args = EmbedArgs {
        image: image_path,
        file: secret_path,
        dest: Some(dir.path().join("dest.jpg")),
        passcode: "pass".to_string(),
        force: false,
    };
    let result = handle_embed(embed_args);

    assert!(result.is_err(), "A lossy destination must be rejected.");
    if let Err(e) = result {
        assert!(e.to_string().contains("lossless"));
    }

    Ok(())
}

/// 验证空口令被拒绝
#[test]
fn test_handle_embed_rejects_empty_passcode() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let secret_path = dir.path().join("secret.txt");

    create_test_image(&image_path, 50, 50);
    fs::write(&secret_path, "needs a passcode")?;

    let embed_args = EmbedArgs {
        image: image_path,
        file: secret_path,
        dest: Some(dir.path().join("dest.png")),
        passcode: String::new(),
        force: false,
    };
    let result = handle_embed(embed_args);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("must not be empty"));
    }

    Ok(())
}
