use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run, stderr, stdout};

#[test]
fn test_make_job_writes_one_file_per_locale() -> Result<()> {
    let test = CliTest::with_translations()?;

    let output = run(test.make_job_command())?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let mut files: Vec<String> = std::fs::read_dir(test.root().join("babel"))?
        .map(|entry| -> Result<String> {
            Ok(entry?.file_name().to_string_lossy().into_owned())
        })
        .collect::<Result<_>>()?;
    files.sort();
    assert_eq!(files, vec!["da.txt", "de.txt", "en.txt"]);

    assert!(stdout(&output).contains("Wrote 3 job files for 10 keys"));

    Ok(())
}

#[test]
fn test_reference_locale_job_has_source_values() -> Result<()> {
    let test = CliTest::with_translations()?;
    run(test.make_job_command())?;

    assert_eq!(
        test.read_file("babel/en.txt")?,
        "\
alreadyPartiallyTranslatedKey[theNotYetTranslatedOne]=yup
arrayvalue[0]=5
arrayvalue[1]=items
arrayvalue[2]=in
arrayvalue[3]=an
arrayvalue[4]=array
keywithplaceholdersinhtml=Key with {0} placeholders in HTML, English
objectvalue[key1]=value1
objectvalue[key2]=value2
objectvaluewithsomemissingkeysinthestructure[foo][bar]=baz
objectvaluewithsomemissingkeysinthestructure[foo][quux]=blah
simplekeyinhtml=Simple key in HTML, English
simplekeyinhtmlattribute=Simple key in HTML attribute, English
simplekeyinknockoutjstemplate=Simple key in a Knockout.js template
stringvalue=value
withexistingkeys=the English value
"
    );

    Ok(())
}

#[test]
fn test_target_locale_job_keeps_existing_translations() -> Result<()> {
    let test = CliTest::with_translations()?;
    run(test.make_job_command())?;

    assert_eq!(
        test.read_file("babel/da.txt")?,
        "\
alreadyPartiallyTranslatedKey[theNotYetTranslatedOne]=
arrayvalue[0]=
arrayvalue[1]=
arrayvalue[2]=
arrayvalue[3]=
arrayvalue[4]=
keywithplaceholdersinhtml=
objectvalue[key1]=
objectvalue[key2]=
objectvaluewithsomemissingkeysinthestructure[foo][bar]=baz
objectvaluewithsomemissingkeysinthestructure[foo][quux]=
simplekeyinhtml=
simplekeyinhtmlattribute=
simplekeyinknockoutjstemplate=
stringvalue=
withexistingkeys=the Danish value
"
    );

    let de = test.read_file("babel/de.txt")?;
    assert_eq!(de.lines().count(), 16);
    assert!(de.lines().all(|line| line.ends_with('=')), "{}", de);

    Ok(())
}

#[test]
fn test_make_job_is_repeatable() -> Result<()> {
    let test = CliTest::with_translations()?;

    run(test.make_job_command())?;
    let first = test.read_file("babel/da.txt")?;
    run(test.make_job_command())?;
    let second = test.read_file("babel/da.txt")?;

    assert_eq!(first, second);
    // The store is only read.
    assert_eq!(test.read_file("thething.i18n")?, crate::STORE_JSON);

    Ok(())
}

#[test]
fn test_cli_flags_without_config() -> Result<()> {
    let test = CliTest::with_file("reference.json", r#"{ "greeting": "Hello" }"#)?;

    let output = run({
        let mut cmd = test.make_job_command();
        cmd.args([
            "--locales",
            "en,fr",
            "--reference",
            "reference.json",
            "--babeldir",
            "jobs",
        ]);
        cmd
    })?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(test.read_file("jobs/en.txt")?, "greeting=Hello\n");
    assert_eq!(test.read_file("jobs/fr.txt")?, "greeting=\n");

    Ok(())
}

#[test]
fn test_reference_defaults_to_store_entries() -> Result<()> {
    let test = CliTest::with_file(
        "translations.i18n.json",
        r#"{ "title": { "en": "Title", "da": "Titel" }, "body": { "en": "Body" } }"#,
    )?;

    let output = run({
        let mut cmd = test.make_job_command();
        cmd.args(["--locales", "da"]);
        cmd
    })?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(test.read_file("babel/da.txt")?, "title=Titel\nbody=\n");

    Ok(())
}

#[test]
fn test_corrupt_store_aborts() -> Result<()> {
    let test = CliTest::with_translations()?;
    test.write_file("thething.i18n", r#"{ "key": "not an object" }"#)?;

    let output = run(test.make_job_command())?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to load locale store"));
    assert!(!test.root().join("babel").exists());

    Ok(())
}

#[test]
fn test_no_locales_is_an_error() -> Result<()> {
    let test = CliTest::with_file("reference.json", "{}")?;

    let output = run(test.make_job_command())?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No locales to process"));

    Ok(())
}
